use crate::error::{PushError, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// A module: one git repository living in a subdirectory of the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
}

impl Module {
    /// Create a module from its directory name
    pub fn new(name: impl Into<String>) -> Self {
        Module { name: name.into() }
    }

    /// Canonical absolute path of the module below `root`.
    ///
    /// Fails when the directory does not exist.
    pub fn resolve(&self, root: &Path) -> Result<PathBuf> {
        let candidate = root.join(&self.name);
        candidate.canonicalize().map_err(|e| {
            PushError::config(format!(
                "Module '{}' not found at {}: {}",
                self.name,
                candidate.display(),
                e
            ))
        })
    }

    /// Commit message used for this module when the run carries none
    pub fn fallback_message(&self) -> String {
        format!("Module {}", self.name)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Commit message chosen once for the whole run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitMessage(Option<String>);

impl CommitMessage {
    /// Build from operator input; blank input means "no message".
    ///
    /// Any other input is kept exactly as typed.
    pub fn from_input(input: &str) -> Self {
        if input.trim().is_empty() {
            CommitMessage(None)
        } else {
            CommitMessage(Some(input.to_string()))
        }
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Message to commit `module` with
    pub fn for_module(&self, module: &Module) -> String {
        match &self.0 {
            Some(message) => message.clone(),
            None => module.fallback_message(),
        }
    }
}
