use crate::error::{PushError, Result};
use crate::git::{CommandOutput, Vcs};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A git command as seen by [MockVcs]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCommand {
    Config { key: String, value: String },
    Add,
    Commit { message: String },
    Push,
    ListTags,
    Tag { name: String },
    PushTags,
}

impl GitCommand {
    /// Short name used to address a command when injecting failures
    pub fn kind(&self) -> &'static str {
        match self {
            GitCommand::Config { .. } => "config",
            GitCommand::Add => "add",
            GitCommand::Commit { .. } => "commit",
            GitCommand::Push => "push",
            GitCommand::ListTags => "list-tags",
            GitCommand::Tag { .. } => "tag",
            GitCommand::PushTags => "push-tags",
        }
    }
}

/// One recorded call against a module directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub path: PathBuf,
    pub command: GitCommand,
}

impl Invocation {
    /// Last path component, i.e. the module name
    pub fn module(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Default)]
struct MockState {
    invocations: Vec<Invocation>,
    dirty: HashSet<String>,
    up_to_date: HashSet<String>,
    tags: HashMap<String, Vec<String>>,
    commit_failures: HashMap<String, String>,
    failures: HashSet<(String, &'static str)>,
}

/// Mock repository set for testing without running git.
///
/// Modules are addressed by directory name. By default a module has nothing
/// to commit; mark it dirty with [MockVcs::with_changes]. A dirty module's
/// push changes the remote unless [MockVcs::with_up_to_date] is set.
#[derive(Default)]
pub struct MockVcs {
    state: Mutex<MockState>,
}

impl MockVcs {
    /// Create a new mock where every module is clean and untagged
    pub fn new() -> Self {
        Self::default()
    }

    /// Give `module` uncommitted changes
    pub fn with_changes(self, module: &str) -> Self {
        self.lock().dirty.insert(module.to_string());
        self
    }

    /// Make `git push` in `module` report "Everything up-to-date"
    pub fn with_up_to_date(self, module: &str) -> Self {
        self.lock().up_to_date.insert(module.to_string());
        self
    }

    /// Seed existing tags of `module`
    pub fn with_tags(self, module: &str, tags: &[&str]) -> Self {
        self.lock()
            .tags
            .entry(module.to_string())
            .or_default()
            .extend(tags.iter().map(|t| t.to_string()));
        self
    }

    /// Make `git commit` in `module` exit 1 with `stderr` and no "nothing to commit" marker
    pub fn with_commit_failure(self, module: &str, stderr: &str) -> Self {
        self.lock()
            .commit_failures
            .insert(module.to_string(), stderr.to_string());
        self
    }

    /// Make the command of the given kind (see [GitCommand::kind]) exit non-zero in `module`
    pub fn failing(self, module: &str, kind: &'static str) -> Self {
        self.lock().failures.insert((module.to_string(), kind));
        self
    }

    /// Every call made so far, in order
    pub fn invocations(&self) -> Vec<Invocation> {
        self.lock().invocations.clone()
    }

    /// Calls made against one module
    pub fn invocations_for(&self, module: &str) -> Vec<GitCommand> {
        self.lock()
            .invocations
            .iter()
            .filter(|i| i.module() == module)
            .map(|i| i.command.clone())
            .collect()
    }

    /// Current tags of a module, including the ones created through the mock
    pub fn tags(&self, module: &str) -> Vec<String> {
        self.lock().tags.get(module).cloned().unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        // poisoned only by a panicking caller; the recorded state is still valid
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, path: &Path, command: GitCommand) -> Result<String> {
        let mut state = self.lock();
        let invocation = Invocation {
            path: path.to_path_buf(),
            command,
        };
        let module = invocation.module();
        let kind = invocation.command.kind();
        state.invocations.push(invocation);

        if state.failures.contains(&(module.clone(), kind)) {
            return Err(PushError::command(
                format!("git {}", kind),
                path,
                1,
                "mock failure",
            ));
        }

        Ok(module)
    }
}

impl Vcs for MockVcs {
    fn set_config(&self, module_path: &Path, key: &str, value: &str) -> Result<()> {
        self.record(
            module_path,
            GitCommand::Config {
                key: key.to_string(),
                value: value.to_string(),
            },
        )?;
        Ok(())
    }

    fn add_all(&self, module_path: &Path) -> Result<()> {
        self.record(module_path, GitCommand::Add)?;
        Ok(())
    }

    fn commit(&self, module_path: &Path, message: &str) -> Result<CommandOutput> {
        let module = self.record(
            module_path,
            GitCommand::Commit {
                message: message.to_string(),
            },
        )?;

        let mut state = self.lock();
        if let Some(stderr) = state.commit_failures.get(&module) {
            return Ok(CommandOutput {
                code: Some(1),
                stdout: String::new(),
                stderr: stderr.clone(),
            });
        }

        if state.dirty.remove(&module) {
            Ok(CommandOutput::success(
                format!("[main 0000000] {}\n 1 file changed\n", message),
                "",
            ))
        } else {
            Ok(CommandOutput {
                code: Some(1),
                stdout: "On branch main\nnothing to commit, working tree clean\n".to_string(),
                stderr: String::new(),
            })
        }
    }

    fn push(&self, module_path: &Path) -> Result<CommandOutput> {
        let module = self.record(module_path, GitCommand::Push)?;

        if self.lock().up_to_date.contains(&module) {
            Ok(CommandOutput::success("", "Everything up-to-date\n"))
        } else {
            Ok(CommandOutput::success(
                "",
                format!("To origin/{}.git\n   0000000..1111111  main -> main\n", module),
            ))
        }
    }

    fn list_tags(&self, module_path: &Path) -> Result<Vec<String>> {
        let module = self.record(module_path, GitCommand::ListTags)?;
        Ok(self.tags(&module))
    }

    fn create_tag(&self, module_path: &Path, name: &str) -> Result<()> {
        let module = self.record(
            module_path,
            GitCommand::Tag {
                name: name.to_string(),
            },
        )?;
        self.lock().tags.entry(module).or_default().push(name.to_string());
        Ok(())
    }

    fn push_tags(&self, module_path: &Path) -> Result<()> {
        self.record(module_path, GitCommand::PushTags)?;
        Ok(())
    }
}
