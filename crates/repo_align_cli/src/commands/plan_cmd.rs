//! The `plan` command: calculate and render a reconciliation plan.

use clap::Args;
use tracing::{info, warn};

use config_model::RepoConfig;
use repo_align_core::{Plan, PlanCalculator};

use crate::commands::{unsupported_secret_provider, TargetArgs};
use crate::errors::Error;
use crate::output;

/// Show the changes needed to align the repository with its configuration.
#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

/// Runs the plan command and returns the process exit code.
pub async fn execute(args: &PlanArgs) -> Result<i32, Error> {
    let (_, plan) = calculate(&args.target).await?;
    if args.target.json {
        println!("{}", output::render_json(&plan));
    } else {
        print!("{}", output::render_text(&plan));
    }
    Ok(output::exit_code(&plan))
}

/// Resolves the configuration and calculates a plan against it.
///
/// The resolved configuration is returned alongside the plan so `apply`
/// pushes exactly the state that was previewed, even if the file or a
/// remote extends document changes in between.
pub async fn calculate(target: &TargetArgs) -> Result<(RepoConfig, Plan), Error> {
    let config = target.effective_config().await?;
    if let Some(kind) = unsupported_secret_provider(&config) {
        warn!(
            provider = kind,
            "external secret providers are not supported; values come from the environment and env file"
        );
    }
    let values = target.values()?;
    let gateway = target.gateway()?;

    info!(
        owner = target.owner.as_str(),
        repo = target.repo.as_str(),
        config = %target.config.display(),
        "calculating plan"
    );
    let calculator = PlanCalculator::new(&gateway, &values);
    let plan = calculator
        .calculate_with_options(&config, &target.plan_options())
        .await?;
    Ok((config, plan))
}
