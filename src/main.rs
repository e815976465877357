use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use git_push_modules::cli::{run_push_workflow, PushWorkflowArgs, RunResult};
use git_push_modules::config;
use git_push_modules::git::GitCli;
use git_push_modules::logging;
use git_push_modules::ui::{self, DialoguerConfirmPrompter, DialoguerStringPrompter};

#[derive(clap::Parser)]
#[command(
    name = "git-push-modules",
    version,
    about = "Commit, push and tag every module repository below a directory"
)]
struct Args {
    #[arg(long, value_name = "DIR", help = "Directory containing the module repositories")]
    path: Option<PathBuf>,

    #[arg(
        long = "only",
        value_name = "MODULE",
        help = "Process only this module (repeatable)"
    )]
    only: Vec<String>,

    #[arg(short, long, help = "Commit message; skips the message prompt")]
    message: Option<String>,

    #[arg(short = 'y', long = "yes", help = "Skip the confirmation prompt")]
    yes: bool,

    #[arg(short, long, value_name = "FILE", help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.verbose)?;

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let workflow_args = PushWorkflowArgs {
        root: args.path,
        only: args.only,
        message: args.message,
        assume_yes: args.yes,
    };

    let result = run_push_workflow(
        &workflow_args,
        &config,
        &GitCli::new(),
        &mut DialoguerStringPrompter,
        &mut DialoguerConfirmPrompter,
    );

    match &result {
        RunResult::Completed(summary) => ui::display_summary(&summary.reports),
        RunResult::AbortedByUser => println!("Operation cancelled by user."),
        RunResult::AbortedByConfigError(message) => ui::display_error(message),
        RunResult::AbortedByCommandFailure { module, cause } => {
            ui::display_error(cause);
            ui::display_error(&format!(
                "Run stopped at module '{}'; modules after it were not processed",
                module
            ));
        }
    }

    if !result.is_success() {
        std::process::exit(1);
    }

    Ok(())
}
