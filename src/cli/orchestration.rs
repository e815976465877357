//! Main workflow orchestration logic
//!
//! Strings the stages of a run together: configuration and root checks,
//! the commit-message prompt, module enumeration, then the publisher once per
//! module. Every way a run can end is a [RunResult]; nothing here exits the
//! process.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::enumerate::{list_modules, resolve_root};
use crate::git::Vcs;
use crate::input::collect_commit_message;
use crate::publisher::{ModulePublisher, ModuleReport};
use crate::ui::{self, ConfirmPrompter, StringPrompter};

/// Arguments for the push workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PushWorkflowArgs {
    /// Root directory holding the modules, overrides `root` from the config
    pub root: Option<PathBuf>,

    /// Explicit module allow-list, overrides `only` from the config
    pub only: Vec<String>,

    /// Commit message given up front; the message prompt is skipped
    pub message: Option<String>,

    /// Skip the confirmation prompt
    pub assume_yes: bool,
}

/// Modules handled by a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub root: PathBuf,
    pub reports: Vec<ModuleReport>,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunResult {
    /// Every module was processed
    Completed(RunSummary),

    /// The operator declined the confirmation; nothing was done
    AbortedByUser,

    /// The configuration was unusable; nothing was done
    AbortedByConfigError(String),

    /// A must-succeed git command failed; modules before it stay published
    AbortedByCommandFailure { module: String, cause: String },
}

impl RunResult {
    /// Whether the process should exit with status 0
    pub fn is_success(&self) -> bool {
        matches!(self, RunResult::Completed(_) | RunResult::AbortedByUser)
    }
}

/// Main push workflow
///
/// 1. Resolve the root and validate the configuration
/// 2. Ask for the commit message and confirmation
/// 3. Enumerate modules and resolve their paths
/// 4. Publish each module in order, stopping at the first fatal failure
pub fn run_push_workflow<V, P, C>(
    args: &PushWorkflowArgs,
    config: &Config,
    vcs: &V,
    prompter: &mut P,
    confirmer: &mut C,
) -> RunResult
where
    V: Vcs,
    P: StringPrompter + ?Sized,
    C: ConfirmPrompter + ?Sized,
{
    let Some(root) = args.root.clone().or_else(|| config.root.clone()) else {
        return RunResult::AbortedByConfigError("Not set option path.".to_string());
    };

    let root = match resolve_root(&root) {
        Ok(root) => root,
        Err(e) => return RunResult::AbortedByConfigError(e.to_string()),
    };

    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => return RunResult::AbortedByConfigError(e.to_string()),
    };

    let message = match collect_commit_message(
        args.message.as_deref(),
        args.assume_yes,
        prompter,
        confirmer,
    ) {
        Ok(Some(message)) => message,
        Ok(None) => {
            info!("operator declined, nothing done");
            return RunResult::AbortedByUser;
        }
        Err(e) => {
            return RunResult::AbortedByConfigError(format!(
                "{} (use --message and --yes when running without a terminal)",
                e
            ))
        }
    };

    let only = if args.only.is_empty() {
        &config.only
    } else {
        &args.only
    };

    let modules = match list_modules(&root, only) {
        Ok(modules) => modules,
        Err(e) => return RunResult::AbortedByConfigError(e.to_string()),
    };

    // Resolve every path before the first git command runs
    let mut resolved = Vec::with_capacity(modules.len());
    for module in modules {
        match module.resolve(&root) {
            Ok(path) => resolved.push((module, path)),
            Err(e) => return RunResult::AbortedByConfigError(e.to_string()),
        }
    }

    if resolved.is_empty() {
        ui::display_boundary_warning(&BoundaryWarning::NoModules {
            root: root.display().to_string(),
        });
        return RunResult::Completed(RunSummary {
            root,
            reports: Vec::new(),
        });
    }

    info!(root = %root.display(), count = resolved.len(), policy = %settings.policy, "publishing modules");

    let publisher = ModulePublisher::new(vcs, &settings);
    let mut reports = Vec::with_capacity(resolved.len());

    for (module, path) in &resolved {
        ui::display_status(&format!("Publishing module {}", module));

        match publisher.publish(module, path, &message) {
            Ok(report) => {
                ui::display_module_report(&report);
                reports.push(report);
            }
            Err(failure) => {
                warn!(module = %failure.module, state = %failure.state, "aborting run");
                return RunResult::AbortedByCommandFailure {
                    module: failure.module.clone(),
                    cause: failure.to_string(),
                };
            }
        }
    }

    RunResult::Completed(RunSummary { root, reports })
}
