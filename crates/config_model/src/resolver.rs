//! Extends-chain resolution.
//!
//! A document may inherit from other documents, local or remote, through its
//! `extends` list. [`ExtendsResolver`] flattens the whole chain into one
//! effective document: references are resolved depth first in list order,
//! later references override earlier ones field by field, and the local
//! document itself always merges last so it has final precedence.
//!
//! Cycle detection uses one visited set for the entire resolution, so a
//! repeated reference anywhere in the graph, including diamonds and
//! self-references, fails with [`ConfigError::CircularReference`] instead of
//! recursing forever.

use std::collections::HashSet;
use std::future::Future;
use std::path::{Component, Path, PathBuf};
use std::pin::Pin;

use tracing::debug;
use url::Url;

use crate::document::RepoConfig;
use crate::errors::{ConfigError, ConfigResult};
use crate::loader::DocumentLoader;

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;

/// Where relative references inside a document resolve from.
///
/// A document loaded from a file resolves relative references against its
/// parent directory; a document fetched from a URL resolves them against
/// that URL.
#[derive(Debug, Clone)]
pub enum ReferenceBase {
    Dir(PathBuf),
    Url(Url),
}

/// A normalized extends reference with a canonical identity.
#[derive(Debug, Clone)]
enum Reference {
    Local(PathBuf),
    Remote(Url),
}

impl Reference {
    /// Canonical identity used for cycle detection.
    fn identity(&self) -> String {
        match self {
            Reference::Local(path) => path.display().to_string(),
            Reference::Remote(url) => url.to_string(),
        }
    }

    /// The base for relative references inside the referenced document.
    fn base(&self) -> ReferenceBase {
        match self {
            Reference::Local(path) => ReferenceBase::Dir(
                path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf(),
            ),
            Reference::Remote(url) => ReferenceBase::Url(url.clone()),
        }
    }
}

fn is_url(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

/// Removes `.` and `..` components lexically so the same file referenced
/// through different relative spellings shares one identity.
fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(Component::ParentDir);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

fn normalize(reference: &str, base: &ReferenceBase) -> ConfigResult<Reference> {
    if is_url(reference) {
        let url = Url::parse(reference).map_err(|err| ConfigError::InvalidReference {
            reference: reference.to_string(),
            reason: err.to_string(),
        })?;
        return Ok(Reference::Remote(url));
    }
    match base {
        ReferenceBase::Dir(dir) => Ok(Reference::Local(normalize_path(&dir.join(reference)))),
        ReferenceBase::Url(url) => {
            let joined = url.join(reference).map_err(|err| ConfigError::InvalidReference {
                reference: reference.to_string(),
                reason: err.to_string(),
            })?;
            Ok(Reference::Remote(joined))
        }
    }
}

/// Resolves extends chains into effective documents.
pub struct ExtendsResolver<L> {
    loader: L,
}

impl<L: DocumentLoader> ExtendsResolver<L> {
    /// Creates a resolver around a document loader.
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    /// Resolves `doc` and everything it extends into one effective document.
    ///
    /// The returned document has `extends` cleared.
    ///
    /// # Errors
    ///
    /// Fails on unreadable files, failed fetches, malformed documents and
    /// circular references; the error names the offending reference.
    pub async fn resolve(&self, doc: RepoConfig, base: ReferenceBase) -> ConfigResult<RepoConfig> {
        let mut visited = HashSet::new();
        self.resolve_inner(doc, base, &mut visited).await
    }

    // Async recursion needs an explicitly boxed future.
    fn resolve_inner<'a>(
        &'a self,
        doc: RepoConfig,
        base: ReferenceBase,
        visited: &'a mut HashSet<String>,
    ) -> Pin<Box<dyn Future<Output = ConfigResult<RepoConfig>> + Send + 'a>> {
        Box::pin(async move {
            if doc.extends_refs().is_empty() {
                return Ok(doc);
            }

            let mut merged = RepoConfig::new();
            for reference in doc.extends_refs() {
                let resolved = normalize(reference, &base)?;
                let identity = resolved.identity();
                debug!(reference = reference.as_str(), identity = identity.as_str(), "resolving extends reference");
                if !visited.insert(identity) {
                    return Err(ConfigError::CircularReference {
                        reference: reference.clone(),
                    });
                }

                let parent = match &resolved {
                    Reference::Local(path) => self.loader.load_local(path).await?,
                    Reference::Remote(url) => self.loader.load_remote(url).await?,
                };
                let parent = self
                    .resolve_inner(parent, resolved.base(), visited)
                    .await?;
                merged.merge_from(&parent);
            }

            // The local document always wins over everything it extends.
            let mut local = doc;
            local.extends = None;
            merged.merge_from(&local);
            Ok(merged)
        })
    }
}
