//! The `apply` command: calculate a plan, confirm, and push it.

use std::io::{self, Write};

use clap::Args;
use colored::Colorize;
use tracing::info;

use repo_align_core::apply_plan;

use crate::commands::{plan_cmd, TargetArgs};
use crate::errors::Error;
use crate::output;

#[cfg(test)]
#[path = "apply_cmd_tests.rs"]
mod tests;

/// Align the repository with its configuration.
#[derive(Args, Debug)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Apply without prompting, even when the plan contains deletions.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Runs the apply command and returns the process exit code.
pub async fn execute(args: &ApplyArgs) -> Result<i32, Error> {
    // The resolved configuration travels with the plan so the apply pushes
    // the state that was shown, not a re-resolved one.
    let (config, plan) = plan_cmd::calculate(&args.target).await?;
    if args.target.json {
        println!("{}", output::render_json(&plan));
    } else {
        print!("{}", output::render_text(&plan));
    }

    if !plan.has_changes() {
        return Ok(0);
    }
    if plan.has_deletes() && !args.yes && !confirm_deletes(plan.summary().delete)? {
        println!("Apply aborted.");
        return Ok(0);
    }

    let gateway = args.target.gateway()?;
    let report = apply_plan(&gateway, &config, &plan).await?;

    info!(
        applied = report.applied,
        skipped = report.skipped,
        "apply finished"
    );
    println!(
        "{} {} applied, {} skipped.",
        "Done.".green(),
        report.applied,
        report.skipped
    );
    Ok(0)
}

fn confirm_deletes(count: usize) -> Result<bool, Error> {
    print!(
        "{} plan contains {count} deletion(s). Continue? [y/N] ",
        "Warning:".yellow().bold()
    );
    io::stdout().flush().map_err(|_| Error::StdOutFlushFailed)?;

    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .map_err(|_| Error::StdInReadFailed)?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
