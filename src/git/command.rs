use crate::error::{PushError, Result};
use crate::git::{CommandOutput, Vcs};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// [Vcs] backed by the system `git` binary.
///
/// Each invocation runs with its working directory set to the module path and
/// blocks until git exits. Tags are read through `git2` instead of a
/// `git tag | sort -V` pipeline; ordering happens in [crate::domain::tag].
/// Both locate the repository by searching upward from the module path.
pub struct GitCli {
    program: OsString,
}

impl GitCli {
    /// Use `git` from `PATH`
    pub fn new() -> Self {
        GitCli {
            program: OsString::from("git"),
        }
    }

    /// Use a specific git executable
    pub fn with_program(program: impl Into<OsString>) -> Self {
        GitCli {
            program: program.into(),
        }
    }

    fn display_command(args: &[&str]) -> String {
        format!("git {}", args.join(" "))
    }

    /// Run git and capture its output whatever the exit status.
    fn run(&self, module_path: &Path, args: &[&str]) -> Result<CommandOutput> {
        debug!(path = %module_path.display(), command = %Self::display_command(args), "running git");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(module_path)
            .output()
            .map_err(|e| {
                PushError::command(
                    Self::display_command(args),
                    module_path,
                    -1,
                    format!("failed to start git: {}", e),
                )
            })?;

        let captured = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        debug!(code = ?captured.code, stdout = %captured.stdout.trim_end(), stderr = %captured.stderr.trim_end(), "git finished");
        Ok(captured)
    }

    /// Run git and turn a non-zero exit into [PushError::Command].
    fn run_checked(&self, module_path: &Path, args: &[&str]) -> Result<CommandOutput> {
        let output = self.run(module_path, args)?;

        if !output.is_success() {
            return Err(PushError::command(
                Self::display_command(args),
                module_path,
                output.code.unwrap_or(-1),
                output.combined(),
            ));
        }

        Ok(output)
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl Vcs for GitCli {
    fn set_config(&self, module_path: &Path, key: &str, value: &str) -> Result<()> {
        self.run_checked(module_path, &["config", key, value])?;
        Ok(())
    }

    fn add_all(&self, module_path: &Path) -> Result<()> {
        self.run_checked(module_path, &["add", "."])?;
        Ok(())
    }

    fn commit(&self, module_path: &Path, message: &str) -> Result<CommandOutput> {
        self.run(module_path, &["commit", "-m", message])
    }

    fn push(&self, module_path: &Path) -> Result<CommandOutput> {
        self.run_checked(module_path, &["push"])
    }

    fn list_tags(&self, module_path: &Path) -> Result<Vec<String>> {
        let repo = git2::Repository::discover(module_path)?;
        let tags = repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn create_tag(&self, module_path: &Path, name: &str) -> Result<()> {
        self.run_checked(module_path, &["tag", name])?;
        Ok(())
    }

    fn push_tags(&self, module_path: &Path) -> Result<()> {
        self.run_checked(module_path, &["push", "--tags"])?;
        Ok(())
    }
}
