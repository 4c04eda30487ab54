use clap::{ArgAction, Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod env_file;
mod errors;
mod output;

use commands::apply_cmd::{self, ApplyArgs};
use commands::plan_cmd::{self, PlanArgs};

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// RepoAlign CLI: Align GitHub repository settings with a configuration file
#[derive(Parser)]
#[command(name = "repo-align")]
#[command(about = "Align GitHub repository settings with a configuration file", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the changes needed to align the repository
    Plan(PlanArgs),

    /// Apply the calculated changes to the repository
    Apply(ApplyArgs),

    /// Show the CLI version
    Version,
}

fn log_filter(verbose: u8, quiet: bool) -> EnvFilter {
    let fallback = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    EnvFilter::try_from_env("REPO_ALIGN_LOG").unwrap_or_else(|_| EnvFilter::new(fallback))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(cli.verbose, cli.quiet))
        .init();

    let result = match &cli.command {
        Commands::Plan(args) => plan_cmd::execute(args).await,
        Commands::Apply(args) => apply_cmd::execute(args).await,
        Commands::Version => {
            println!("repo-align version {}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
