//! Tests for the resolver module.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use url::Url;

use super::*;
use crate::errors::ConfigError;
use crate::loader::{parse_document, DocumentLoader, Loader};

/// In-memory loader keyed by normalized path or URL string.
struct MapLoader {
    documents: HashMap<String, String>,
}

impl MapLoader {
    fn new(entries: &[(&str, &str)]) -> Self {
        let documents = entries
            .iter()
            .map(|(key, body)| (key.to_string(), body.to_string()))
            .collect();
        Self { documents }
    }
}

#[async_trait]
impl DocumentLoader for MapLoader {
    async fn load_local(&self, path: &Path) -> ConfigResult<RepoConfig> {
        let key = path.display().to_string();
        match self.documents.get(&key) {
            Some(body) => parse_document(&key, body),
            None => Err(ConfigError::FileAccess {
                path: key,
                reason: "not found".to_string(),
            }),
        }
    }

    async fn load_remote(&self, url: &Url) -> ConfigResult<RepoConfig> {
        let key = url.to_string();
        match self.documents.get(&key) {
            Some(body) => parse_document(&key, body),
            None => Err(ConfigError::FetchStatus {
                url: key,
                status: 404,
            }),
        }
    }
}

fn base_dir() -> ReferenceBase {
    ReferenceBase::Dir(PathBuf::from("/configs"))
}

fn doc(yaml: &str) -> RepoConfig {
    serde_yaml::from_str(yaml).expect("test document should parse")
}

#[tokio::test]
async fn test_no_extends_returns_document_unchanged() {
    let resolver = ExtendsResolver::new(MapLoader::new(&[]));
    let original = doc("topics: [rust]");

    let resolved = resolver.resolve(original.clone(), base_dir()).await.unwrap();

    assert_eq!(resolved, original);
}

#[tokio::test]
async fn test_chain_merges_with_local_document_last() {
    let loader = MapLoader::new(&[
        (
            "/configs/a.yml",
            "repo:\n  description: from-a\n  homepage: https://a.example\n",
        ),
        (
            "/configs/b.yml",
            "extends: [a.yml]\nrepo:\n  description: from-b\n",
        ),
    ]);
    let resolver = ExtendsResolver::new(loader);
    let local = doc("extends: [b.yml]\nrepo:\n  description: from-local\n");

    let resolved = resolver.resolve(local, base_dir()).await.unwrap();

    assert!(resolved.extends.is_none(), "effective document clears extends");
    let repo = resolved.repo.unwrap();
    assert_eq!(repo.description.as_deref(), Some("from-local"));
    assert_eq!(
        repo.homepage.as_deref(),
        Some("https://a.example"),
        "value set only at the bottom of the chain should survive"
    );
}

#[tokio::test]
async fn test_later_extends_entries_override_earlier_ones() {
    let loader = MapLoader::new(&[
        ("/configs/first.yml", "repo:\n  description: first\n"),
        ("/configs/second.yml", "repo:\n  description: second\n"),
    ]);
    let resolver = ExtendsResolver::new(loader);
    let local = doc("extends: [first.yml, second.yml]\n");

    let resolved = resolver.resolve(local, base_dir()).await.unwrap();

    assert_eq!(
        resolved.repo.unwrap().description.as_deref(),
        Some("second")
    );
}

#[tokio::test]
async fn test_branch_rule_merges_per_field_across_chain() {
    let loader = MapLoader::new(&[(
        "/configs/base.yml",
        "branch_protection:\n  main:\n    require_signed_commits: true\n",
    )]);
    let resolver = ExtendsResolver::new(loader);
    let local = doc("extends: [base.yml]\nbranch_protection:\n  main:\n    required_reviews: 2\n");

    let resolved = resolver.resolve(local, base_dir()).await.unwrap();

    let rules = resolved.branch_protection.unwrap();
    let main = rules.get("main").unwrap();
    assert_eq!(main.required_reviews, Some(2));
    assert_eq!(
        main.require_signed_commits,
        Some(true),
        "base rule field should merge into the local rule for the same branch"
    );
}

#[tokio::test]
async fn test_relative_reference_resolves_against_parent_directory() {
    let loader = MapLoader::new(&[
        ("/configs/shared/org.yml", "topics: [org-topic]"),
        (
            "/configs/shared/team.yml",
            "extends: [org.yml]\nrepo:\n  description: team\n",
        ),
    ]);
    let resolver = ExtendsResolver::new(loader);
    let local = doc("extends: [shared/team.yml]\n");

    let resolved = resolver.resolve(local, base_dir()).await.unwrap();

    assert_eq!(resolved.topics.unwrap(), vec!["org-topic".to_string()]);
}

#[tokio::test]
async fn test_remote_reference_resolves_relative_against_url() {
    let loader = MapLoader::new(&[
        (
            "https://example.com/configs/root.yml",
            "extends: [common.yml]\n",
        ),
        ("https://example.com/configs/common.yml", "topics: [shared]"),
    ]);
    let resolver = ExtendsResolver::new(loader);
    let local = doc("extends: [\"https://example.com/configs/root.yml\"]\n");

    let resolved = resolver.resolve(local, base_dir()).await.unwrap();

    assert_eq!(resolved.topics.unwrap(), vec!["shared".to_string()]);
}

#[tokio::test]
async fn test_self_extend_is_a_circular_reference() {
    let loader = MapLoader::new(&[("/configs/a.yml", "extends: [a.yml]\n")]);
    let resolver = ExtendsResolver::new(loader);
    let local = doc("extends: [a.yml]\n");

    let err = resolver.resolve(local, base_dir()).await.unwrap_err();

    assert!(
        matches!(err, ConfigError::CircularReference { ref reference } if reference == "a.yml"),
        "expected CircularReference, got {err:?}"
    );
}

#[tokio::test]
async fn test_two_document_cycle_is_detected() {
    let loader = MapLoader::new(&[
        ("/configs/a.yml", "extends: [b.yml]\n"),
        ("/configs/b.yml", "extends: [a.yml]\n"),
    ]);
    let resolver = ExtendsResolver::new(loader);
    let local = doc("extends: [a.yml]\n");

    let err = resolver.resolve(local, base_dir()).await.unwrap_err();

    assert!(matches!(err, ConfigError::CircularReference { .. }));
}

#[tokio::test]
async fn test_diamond_reference_is_rejected() {
    // Both parents extend the same grandparent; the shared visited set
    // rejects the second visit.
    let loader = MapLoader::new(&[
        ("/configs/grand.yml", "topics: [g]"),
        ("/configs/left.yml", "extends: [grand.yml]\n"),
        ("/configs/right.yml", "extends: [grand.yml]\n"),
    ]);
    let resolver = ExtendsResolver::new(loader);
    let local = doc("extends: [left.yml, right.yml]\n");

    let err = resolver.resolve(local, base_dir()).await.unwrap_err();

    assert!(matches!(err, ConfigError::CircularReference { .. }));
}

#[tokio::test]
async fn test_missing_file_error_names_the_reference() {
    let resolver = ExtendsResolver::new(MapLoader::new(&[]));
    let local = doc("extends: [missing.yml]\n");

    let err = resolver.resolve(local, base_dir()).await.unwrap_err();

    match err {
        ConfigError::FileAccess { path, .. } => {
            assert_eq!(path, "/configs/missing.yml");
        }
        other => panic!("expected FileAccess, got {other:?}"),
    }
}

#[tokio::test]
async fn test_dot_segments_share_one_identity() {
    let loader = MapLoader::new(&[("/configs/a.yml", "extends: [\"./sub/../a.yml\"]\n")]);
    let resolver = ExtendsResolver::new(loader);
    let local = doc("extends: [a.yml]\n");

    let err = resolver.resolve(local, base_dir()).await.unwrap_err();

    assert!(
        matches!(err, ConfigError::CircularReference { .. }),
        "differently spelled paths to the same file must share a cycle identity"
    );
}

#[tokio::test]
async fn test_loader_reads_real_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let base = dir.path().to_path_buf();
    tokio::fs::write(base.join("base.yml"), "topics: [from-disk]\n")
        .await
        .unwrap();

    let resolver = ExtendsResolver::new(Loader::new().unwrap());
    let local = doc("extends: [base.yml]\nrepo:\n  description: local\n");

    let resolved = resolver
        .resolve(local, ReferenceBase::Dir(base))
        .await
        .unwrap();

    assert_eq!(resolved.topics.unwrap(), vec!["from-disk".to_string()]);
    assert_eq!(resolved.repo.unwrap().description.as_deref(), Some("local"));
}
