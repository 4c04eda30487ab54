//! Plan rendering and exit-code mapping.
//!
//! The text renderer prints one line per change with a kind marker
//! (`+` add, `~` update, `-` delete, `!` missing); the JSON renderer emits
//! the plan report verbatim so automation can parse it.

use colored::Colorize;
use repo_align_core::{Change, ChangeKind, Plan};

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

/// Exit code for a calculated plan.
///
/// `0` when the plan contains no deletions and no missing values, `2` when
/// it contains deletions, `3` when any secret or variable value is missing
/// locally. Missing values take precedence over deletions.
pub fn exit_code(plan: &Plan) -> i32 {
    if plan.has_missing_secrets() || plan.has_missing_variables() {
        3
    } else if plan.has_deletes() {
        2
    } else {
        0
    }
}

/// Renders the plan report as pretty-printed JSON.
pub fn render_json(plan: &Plan) -> String {
    // PlanReport contains only string-keyed structs, serialization cannot fail.
    serde_json::to_string_pretty(&plan.report()).unwrap_or_default()
}

/// Renders the plan as human-readable text, grouped by category.
pub fn render_text(plan: &Plan) -> String {
    if !plan.has_changes() {
        return "No changes. Repository matches configuration.\n".to_string();
    }

    let report = plan.report();
    let mut out = String::new();
    for group in &report.categories {
        out.push_str(&format!("{}:\n", group.category.to_string().bold()));
        for change in &group.changes {
            out.push_str(&format!("  {}\n", change_line(change)));
        }
    }

    let summary = report.summary;
    out.push_str(&format!(
        "\n{} to add, {} to update, {} to delete, {} missing.\n",
        summary.add, summary.update, summary.delete, summary.missing
    ));
    out
}

fn change_line(change: &Change) -> String {
    match change.kind {
        ChangeKind::Add => match &change.new {
            Some(new) => format!("{} {}: {}", "+".green(), change.key, new),
            None => format!("{} {}", "+".green(), change.key),
        },
        ChangeKind::Update => format!(
            "{} {}: {} -> {}",
            "~".yellow(),
            change.key,
            change.old.as_deref().unwrap_or(""),
            change.new.as_deref().unwrap_or("")
        ),
        ChangeKind::Delete => match &change.old {
            Some(old) => format!("{} {}: {}", "-".red(), change.key, old),
            None => format!("{} {}", "-".red(), change.key),
        },
        ChangeKind::Missing => format!(
            "{} {} (no local value)",
            "!".red().bold(),
            change.key
        ),
    }
}
