//! Per-module publishing pipeline.
//!
//! A module moves through an explicit state machine:
//!
//! ```text
//! Configuring -> Staging -> Committing -> Pushing -> Tagging -> PushingTags -> Done
//!                               |             |
//!                               v             v
//!                        SkippedNoChange  SkippedUpToDate
//! ```
//!
//! Every transition is logged. A failing must-succeed command stops the
//! machine and is returned as a [PublishFailure] carrying the state it failed in.

use std::fmt;
use std::path::Path;

use tracing::{info, warn};

use crate::boundary::BoundaryWarning;
use crate::calculator::VersionCalculator;
use crate::config::PublishSettings;
use crate::domain::{CommitMessage, Module};
use crate::error::{PushError, Result};
use crate::git::{outcome, Vcs};

/// Position of a module in the publishing pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishState {
    Configuring,
    Staging,
    Committing,
    Pushing,
    Tagging,
    PushingTags,
    Done,
    SkippedNoChange,
    SkippedUpToDate,
}

impl PublishState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PublishState::Done | PublishState::SkippedNoChange | PublishState::SkippedUpToDate
        )
    }
}

impl fmt::Display for PublishState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PublishState::Configuring => "configuring",
            PublishState::Staging => "staging",
            PublishState::Committing => "committing",
            PublishState::Pushing => "pushing",
            PublishState::Tagging => "tagging",
            PublishState::PushingTags => "pushing tags",
            PublishState::Done => "done",
            PublishState::SkippedNoChange => "skipped (nothing to commit)",
            PublishState::SkippedUpToDate => "skipped (remote up to date)",
        };
        write!(f, "{}", name)
    }
}

/// What happened to one module
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleReport {
    pub module: String,
    /// Terminal state reached
    pub state: PublishState,
    pub previous_tag: Option<String>,
    /// Tag created and pushed, when the module reached [PublishState::Done]
    pub tag: Option<String>,
    pub warnings: Vec<BoundaryWarning>,
}

impl ModuleReport {
    fn new(module: &Module) -> Self {
        ModuleReport {
            module: module.name.clone(),
            state: PublishState::Configuring,
            previous_tag: None,
            tag: None,
            warnings: Vec::new(),
        }
    }
}

/// A module whose pipeline was stopped by a failing command
#[derive(Debug)]
pub struct PublishFailure {
    pub module: String,
    pub state: PublishState,
    pub error: PushError,
}

impl fmt::Display for PublishFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "module '{}' failed while {}: {}",
            self.module, self.state, self.error
        )
    }
}

/// Runs the publishing pipeline against modules, one at a time
pub struct ModulePublisher<'a, V: Vcs> {
    vcs: &'a V,
    settings: &'a PublishSettings,
    calculator: VersionCalculator,
}

impl<'a, V: Vcs> ModulePublisher<'a, V> {
    pub fn new(vcs: &'a V, settings: &'a PublishSettings) -> Self {
        ModulePublisher {
            vcs,
            settings,
            calculator: VersionCalculator::new(settings.policy, settings.initial_tag.clone()),
        }
    }

    /// Publish `module`, located at `module_path`.
    pub fn publish(
        &self,
        module: &Module,
        module_path: &Path,
        message: &CommitMessage,
    ) -> std::result::Result<ModuleReport, PublishFailure> {
        let mut report = ModuleReport::new(module);
        let mut state = PublishState::Configuring;

        while !state.is_terminal() {
            info!(module = %module, state = %state, "publish step");
            state = self
                .advance(state, module, module_path, message, &mut report)
                .map_err(|error| PublishFailure {
                    module: module.name.clone(),
                    state,
                    error,
                })?;
        }

        info!(module = %module, state = %state, tag = ?report.tag, "module finished");
        report.state = state;
        Ok(report)
    }

    fn advance(
        &self,
        state: PublishState,
        module: &Module,
        module_path: &Path,
        message: &CommitMessage,
        report: &mut ModuleReport,
    ) -> Result<PublishState> {
        let next = match state {
            PublishState::Configuring => {
                self.vcs
                    .set_config(module_path, "user.name", &self.settings.author_name)?;
                self.vcs
                    .set_config(module_path, "user.email", &self.settings.author_email)?;
                PublishState::Staging
            }
            PublishState::Staging => {
                self.vcs.add_all(module_path)?;
                PublishState::Committing
            }
            PublishState::Committing => {
                let output = self.vcs.commit(module_path, &message.for_module(module))?;

                if !outcome::commit_happened(&output, &self.settings.markers) {
                    report.warnings.push(BoundaryWarning::NothingToCommit {
                        module: module.name.clone(),
                    });
                    PublishState::SkippedNoChange
                } else {
                    if !output.is_success() {
                        warn!(module = %module, output = %output.combined(), "git commit exited non-zero");
                        report.warnings.push(BoundaryWarning::CommitFailed {
                            module: module.name.clone(),
                            code: output.code,
                        });
                    }
                    PublishState::Pushing
                }
            }
            PublishState::Pushing => {
                let output = self.vcs.push(module_path)?;

                if outcome::push_changed_remote(&output, &self.settings.markers) {
                    PublishState::Tagging
                } else {
                    report.warnings.push(BoundaryWarning::RemoteUpToDate {
                        module: module.name.clone(),
                    });
                    PublishState::SkippedUpToDate
                }
            }
            PublishState::Tagging => {
                let computed = self.calculator.next_for_module(self.vcs, module_path)?;

                if !computed.scan.ignored.is_empty() {
                    report.warnings.push(BoundaryWarning::IgnoredTags {
                        module: module.name.clone(),
                        tags: computed.scan.ignored.clone(),
                    });
                }

                let tag = computed.next.to_string();
                info!(module = %module, tag = %tag, policy = %self.calculator.policy(), "creating tag");
                self.vcs.create_tag(module_path, &tag)?;

                report.previous_tag = computed.scan.latest.map(|t| t.to_string());
                report.tag = Some(tag);
                PublishState::PushingTags
            }
            PublishState::PushingTags => {
                self.vcs.push_tags(module_path)?;
                PublishState::Done
            }
            terminal => terminal,
        };

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::git::{GitCommand, MockVcs};
    use std::path::PathBuf;

    fn settings() -> PublishSettings {
        Config::default().settings().unwrap()
    }

    fn path(name: &str) -> PathBuf {
        PathBuf::from("/work").join(name)
    }

    #[test]
    fn test_full_pipeline() {
        let vcs = MockVcs::new().with_changes("auth").with_tags("auth", &["v1.4.2"]);
        let settings = settings();
        let publisher = ModulePublisher::new(&vcs, &settings);

        let report = publisher
            .publish(&Module::new("auth"), &path("auth"), &CommitMessage::default())
            .unwrap();

        assert_eq!(report.state, PublishState::Done);
        assert_eq!(report.previous_tag.as_deref(), Some("v1.4.2"));
        assert_eq!(report.tag.as_deref(), Some("v1.4.3"));
        assert!(report.warnings.is_empty());
        assert_eq!(
            vcs.invocations_for("auth"),
            vec![
                GitCommand::Config {
                    key: "user.name".to_string(),
                    value: "Module Publisher".to_string()
                },
                GitCommand::Config {
                    key: "user.email".to_string(),
                    value: "publisher@localhost".to_string()
                },
                GitCommand::Add,
                GitCommand::Commit {
                    message: "Module auth".to_string()
                },
                GitCommand::Push,
                GitCommand::ListTags,
                GitCommand::Tag {
                    name: "v1.4.3".to_string()
                },
                GitCommand::PushTags,
            ]
        );
    }

    #[test]
    fn test_nothing_to_commit_stops_before_push() {
        let vcs = MockVcs::new();
        let settings = settings();
        let publisher = ModulePublisher::new(&vcs, &settings);

        let report = publisher
            .publish(&Module::new("cart"), &path("cart"), &CommitMessage::default())
            .unwrap();

        assert_eq!(report.state, PublishState::SkippedNoChange);
        assert_eq!(report.tag, None);
        let commands = vcs.invocations_for("cart");
        assert_eq!(commands.last().map(|c| c.kind()), Some("commit"));
        assert!(!commands
            .iter()
            .any(|c| matches!(c, GitCommand::Push | GitCommand::Tag { .. } | GitCommand::PushTags)));
    }

    #[test]
    fn test_up_to_date_push_stops_before_tag() {
        let vcs = MockVcs::new().with_changes("cart").with_up_to_date("cart");
        let settings = settings();
        let publisher = ModulePublisher::new(&vcs, &settings);

        let report = publisher
            .publish(&Module::new("cart"), &path("cart"), &CommitMessage::default())
            .unwrap();

        assert_eq!(report.state, PublishState::SkippedUpToDate);
        assert_eq!(
            report.warnings,
            vec![BoundaryWarning::RemoteUpToDate {
                module: "cart".to_string()
            }]
        );
        assert_eq!(vcs.invocations_for("cart").last(), Some(&GitCommand::Push));
    }

    #[test]
    fn test_failed_commit_without_marker_still_pushes() {
        let vcs = MockVcs::new()
            .with_commit_failure("auth", "error: gpg failed to sign the data\n");
        let settings = settings();
        let publisher = ModulePublisher::new(&vcs, &settings);

        let report = publisher
            .publish(&Module::new("auth"), &path("auth"), &CommitMessage::default())
            .unwrap();

        assert_eq!(report.state, PublishState::Done);
        assert_eq!(report.tag.as_deref(), Some("v1.0.0"));
        assert_eq!(
            report.warnings,
            vec![BoundaryWarning::CommitFailed {
                module: "auth".to_string(),
                code: Some(1)
            }]
        );

        let commands = vcs.invocations_for("auth");
        assert!(commands.contains(&GitCommand::Push));
        assert_eq!(commands.last(), Some(&GitCommand::PushTags));
    }

    #[test]
    fn test_run_message_is_used_for_commit() {
        let vcs = MockVcs::new().with_changes("auth");
        let settings = settings();
        let publisher = ModulePublisher::new(&vcs, &settings);

        publisher
            .publish(
                &Module::new("auth"),
                &path("auth"),
                &CommitMessage::from_input("Sprint 12"),
            )
            .unwrap();

        assert!(vcs.invocations_for("auth").contains(&GitCommand::Commit {
            message: "Sprint 12".to_string()
        }));
    }

    #[test]
    fn test_failure_reports_state() {
        let vcs = MockVcs::new().with_changes("auth").failing("auth", "push");
        let settings = settings();
        let publisher = ModulePublisher::new(&vcs, &settings);

        let failure = publisher
            .publish(&Module::new("auth"), &path("auth"), &CommitMessage::default())
            .unwrap_err();

        assert_eq!(failure.module, "auth");
        assert_eq!(failure.state, PublishState::Pushing);
        assert!(failure.to_string().contains("failed while pushing"));
    }

    #[test]
    fn test_config_failure_stops_everything() {
        let vcs = MockVcs::new().with_changes("auth").failing("auth", "config");
        let settings = settings();
        let publisher = ModulePublisher::new(&vcs, &settings);

        let failure = publisher
            .publish(&Module::new("auth"), &path("auth"), &CommitMessage::default())
            .unwrap_err();

        assert_eq!(failure.state, PublishState::Configuring);
        assert_eq!(vcs.invocations_for("auth").len(), 1);
    }

    #[test]
    fn test_foreign_tags_produce_warning() {
        let vcs = MockVcs::new()
            .with_changes("auth")
            .with_tags("auth", &["latest", "v0.2.0"]);
        let settings = settings();
        let publisher = ModulePublisher::new(&vcs, &settings);

        let report = publisher
            .publish(&Module::new("auth"), &path("auth"), &CommitMessage::default())
            .unwrap();

        assert_eq!(report.tag.as_deref(), Some("v0.2.1"));
        assert_eq!(
            report.warnings,
            vec![BoundaryWarning::IgnoredTags {
                module: "auth".to_string(),
                tags: vec!["latest".to_string()]
            }]
        );
    }

    #[test]
    fn test_terminal_states() {
        assert!(PublishState::Done.is_terminal());
        assert!(PublishState::SkippedNoChange.is_terminal());
        assert!(PublishState::SkippedUpToDate.is_terminal());
        assert!(!PublishState::Tagging.is_terminal());
    }
}
