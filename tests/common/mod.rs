#![allow(dead_code)]

use std::fs;
use std::path::Path;

use git_push_modules::error::{PushError, Result};
use git_push_modules::ui::{ConfirmPrompter, StringPrompter};

/// Answers prompts from a fixed script and records every question asked
#[derive(Default)]
pub struct Script {
    pub text: Vec<String>,
    pub confirm: Vec<bool>,
    pub asked: Vec<String>,
}

impl Script {
    pub fn new(text: &[&str], confirm: &[bool]) -> Self {
        Script {
            text: text.iter().map(|s| s.to_string()).collect(),
            confirm: confirm.to_vec(),
            asked: Vec::new(),
        }
    }
}

impl StringPrompter for Script {
    fn prompt(&mut self, prompt: &str, _default: &str) -> Result<String> {
        self.asked.push(prompt.to_string());
        if self.text.is_empty() {
            return Err(PushError::prompt("unexpected text prompt"));
        }
        Ok(self.text.remove(0))
    }
}

impl ConfirmPrompter for Script {
    fn confirm(&mut self, prompt: &str, _default: bool) -> Result<bool> {
        self.asked.push(prompt.to_string());
        if self.confirm.is_empty() {
            return Err(PushError::prompt("unexpected confirmation"));
        }
        Ok(self.confirm.remove(0))
    }
}

/// Create one empty directory per module name below `root`
pub fn make_modules(root: &Path, names: &[&str]) {
    for name in names {
        fs::create_dir_all(root.join(name)).unwrap();
    }
}
