use std::fmt;

/// Non-fatal conditions met while publishing modules.
/// They are reported to the operator but never stop the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The root path has no subdirectories
    NoModules { root: String },
    /// `git commit` found nothing staged
    NothingToCommit { module: String },
    /// `git push` had nothing to send, so no tag is created
    RemoteUpToDate { module: String },
    /// `git commit` exited non-zero without reporting a clean tree
    CommitFailed { module: String, code: Option<i32> },
    /// Tags that are not `v<semver>` were left out of the version comparison
    IgnoredTags { module: String, tags: Vec<String> },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoModules { root } => {
                write!(f, "No modules found under '{}'", root)
            }
            BoundaryWarning::NothingToCommit { module } => {
                write!(f, "Nothing to commit in module '{}', skipping push", module)
            }
            BoundaryWarning::RemoteUpToDate { module } => {
                write!(f, "Remote of module '{}' is up to date, skipping tag", module)
            }
            BoundaryWarning::CommitFailed { module, code } => {
                let code = code.map_or_else(|| "signal".to_string(), |c| c.to_string());
                write!(
                    f,
                    "git commit in module '{}' exited with {}; continuing with push",
                    module, code
                )
            }
            BoundaryWarning::IgnoredTags { module, tags } => {
                write!(
                    f,
                    "Ignored non-release tags in module '{}': {}",
                    module,
                    tags.join(", ")
                )
            }
        }
    }
}
