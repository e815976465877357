//! Terminal prompts behind small traits so the workflow can be driven by tests.

use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::error::{PushError, Result};

/// Abstraction over a free-text input prompt.
pub trait StringPrompter {
    /// Ask for a line of text; `default` is returned when the operator just presses Enter.
    fn prompt(&mut self, prompt: &str, default: &str) -> Result<String>;
}

/// Abstraction over a yes/no confirmation prompt.
pub trait ConfirmPrompter {
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;
}

/// [StringPrompter] using `dialoguer::Input` with the colorful theme.
pub struct DialoguerStringPrompter;

impl StringPrompter for DialoguerStringPrompter {
    fn prompt(&mut self, prompt: &str, default: &str) -> Result<String> {
        let theme = ColorfulTheme::default();
        Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .default(default.to_string())
            .allow_empty(true)
            .show_default(false)
            .interact_text()
            .map_err(|e| PushError::prompt(e.to_string()))
    }
}

/// [ConfirmPrompter] using `dialoguer::Confirm` with the colorful theme.
pub struct DialoguerConfirmPrompter;

impl ConfirmPrompter for DialoguerConfirmPrompter {
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let theme = ColorfulTheme::default();
        Confirm::with_theme(&theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| PushError::prompt(e.to_string()))
    }
}
