use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for git-push-modules operations
#[derive(Error, Debug)]
pub enum PushError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Command `{command}` failed in {} with exit code {code}: {output}", .path.display())]
    Command {
        command: String,
        path: PathBuf,
        code: i32,
        output: String,
    },

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-push-modules
pub type Result<T> = std::result::Result<T, PushError>;

impl PushError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        PushError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        PushError::Version(msg.into())
    }

    /// Create a prompt error with context
    pub fn prompt(msg: impl Into<String>) -> Self {
        PushError::Prompt(msg.into())
    }

    /// Create a command failure for a git invocation that exited non-zero
    pub fn command(
        command: impl Into<String>,
        path: impl Into<PathBuf>,
        code: i32,
        output: impl Into<String>,
    ) -> Self {
        PushError::Command {
            command: command.into(),
            path: path.into(),
            code,
            output: output.into(),
        }
    }

    /// Whether this error belongs to the configuration class of failures
    pub fn is_config(&self) -> bool {
        matches!(self, PushError::Config(_) | PushError::ConfigParse(_))
    }
}
