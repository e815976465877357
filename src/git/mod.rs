//! Git operations abstraction layer
//!
//! Every module is driven through the [Vcs] trait, which mirrors the git
//! commands the publisher issues. The concrete implementations are:
//!
//! - [command::GitCli]: runs the `git` binary inside the module directory and
//!   reads tags through `git2`
//! - [mock::MockVcs]: records invocations for tests and can be told to fail
//!
//! No-op detection ("nothing to commit", "Everything up-to-date") lives in
//! [outcome], apart from the command plumbing.

pub mod command;
pub mod mock;
pub mod outcome;

pub use command::GitCli;
pub use mock::{GitCommand, Invocation, MockVcs};

use crate::error::Result;
use std::path::Path;

/// Captured result of a git invocation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Output of a command that exited with status 0
    pub fn success(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        CommandOutput {
            code: Some(0),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// stdout followed by stderr, for marker matching and error reports
    pub fn combined(&self) -> String {
        match (self.stdout.trim().is_empty(), self.stderr.trim().is_empty()) {
            (false, false) => format!("{}\n{}", self.stdout.trim_end(), self.stderr.trim_end()),
            (false, true) => self.stdout.trim_end().to_string(),
            (true, false) => self.stderr.trim_end().to_string(),
            (true, true) => String::new(),
        }
    }
}

/// Git operations the publisher needs, all scoped to one module directory.
///
/// Methods other than [Vcs::commit] are "must succeed": a non-zero exit is
/// returned as [crate::error::PushError::Command] and aborts the run.
pub trait Vcs: Send + Sync {
    /// `git config <key> <value>`
    fn set_config(&self, module_path: &Path, key: &str, value: &str) -> Result<()>;

    /// `git add .`
    fn add_all(&self, module_path: &Path) -> Result<()>;

    /// `git commit -m <message>`
    ///
    /// A non-zero exit is not an error here: "nothing to commit" exits with 1,
    /// and the caller decides from the output.
    fn commit(&self, module_path: &Path, message: &str) -> Result<CommandOutput>;

    /// `git push`, returning the output so a no-op push can be recognised
    fn push(&self, module_path: &Path) -> Result<CommandOutput>;

    /// Names of every tag in the module repository, in no particular order
    fn list_tags(&self, module_path: &Path) -> Result<Vec<String>>;

    /// `git tag <name>`
    fn create_tag(&self, module_path: &Path, name: &str) -> Result<()>;

    /// `git push --tags`
    fn push_tags(&self, module_path: &Path) -> Result<()>;
}
