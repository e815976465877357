use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{IncrementPolicy, VersionTag};
use crate::error::{PushError, Result};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "pusher.toml";

/// File name looked up in the user configuration directory
pub const USER_CONFIG_FILE: &str = ".pusher.toml";

/// Represents the complete configuration for git-push-modules.
///
/// Holds the optional root and allow-list, the author identity written into
/// every module, the version increment policy and the output markers used to
/// recognise no-op git commands.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub root: Option<PathBuf>,

    #[serde(default)]
    pub only: Vec<String>,

    #[serde(default)]
    pub author: AuthorConfig,

    #[serde(default)]
    pub version: VersionConfig,

    #[serde(default)]
    pub markers: MarkersConfig,
}

fn default_author_name() -> String {
    "Module Publisher".to_string()
}

fn default_author_email() -> String {
    "publisher@localhost".to_string()
}

/// Identity written to `user.name` / `user.email` of each module.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AuthorConfig {
    #[serde(default = "default_author_name")]
    pub name: String,

    #[serde(default = "default_author_email")]
    pub email: String,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        AuthorConfig {
            name: default_author_name(),
            email: default_author_email(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_initial_tag() -> String {
    "v1.0.0".to_string()
}

/// Increment policy flags. Exactly one of them must be enabled.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct VersionConfig {
    #[serde(default)]
    pub major: bool,

    #[serde(default)]
    pub minor: bool,

    #[serde(default = "default_true")]
    pub patch: bool,

    /// Tag given to a module that has no release tag yet
    #[serde(default = "default_initial_tag")]
    pub initial_tag: String,
}

impl Default for VersionConfig {
    fn default() -> Self {
        VersionConfig {
            major: false,
            minor: false,
            patch: true,
            initial_tag: default_initial_tag(),
        }
    }
}

fn default_nothing_to_commit() -> Vec<String> {
    vec!["nothing to commit, working tree clean".to_string()]
}

fn default_up_to_date() -> Vec<String> {
    vec!["Everything up-to-date".to_string()]
}

/// Substrings that mark a git command as a no-op.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MarkersConfig {
    #[serde(default = "default_nothing_to_commit")]
    pub nothing_to_commit: Vec<String>,

    #[serde(default = "default_up_to_date")]
    pub up_to_date: Vec<String>,
}

impl Default for MarkersConfig {
    fn default() -> Self {
        MarkersConfig {
            nothing_to_commit: default_nothing_to_commit(),
            up_to_date: default_up_to_date(),
        }
    }
}

/// Validated, immutable settings threaded into the publisher for the whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishSettings {
    pub author_name: String,
    pub author_email: String,
    pub policy: IncrementPolicy,
    pub initial_tag: VersionTag,
    pub markers: MarkersConfig,
}

impl Config {
    /// Validate the configuration and produce the run settings.
    ///
    /// All configuration errors surface here, before any module is touched.
    pub fn settings(&self) -> Result<PublishSettings> {
        let policy =
            IncrementPolicy::from_flags(self.version.major, self.version.minor, self.version.patch)?;

        let initial_tag = VersionTag::parse(&self.version.initial_tag).map_err(|e| {
            PushError::config(format!(
                "version.initial_tag '{}' is not a release tag: {}",
                self.version.initial_tag, e
            ))
        })?;

        if self.author.name.trim().is_empty() || self.author.email.trim().is_empty() {
            return Err(PushError::config("author.name and author.email must not be empty"));
        }

        if self.markers.nothing_to_commit.iter().any(|m| m.is_empty())
            || self.markers.up_to_date.iter().any(|m| m.is_empty())
        {
            return Err(PushError::config("output markers must not be empty strings"));
        }

        Ok(PublishSettings {
            author_name: self.author.name.clone(),
            author_email: self.author.email.clone(),
            policy,
            initial_tag,
            markers: self.markers.clone(),
        })
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `pusher.toml` in current directory
/// 3. `.pusher.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path).map_err(|e| {
            PushError::config(format!("Cannot read config file {}: {}", path.display(), e))
        })?
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        fs::read_to_string(LOCAL_CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
