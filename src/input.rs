//! Collects the run-wide commit message and the operator's go-ahead.

use crate::domain::CommitMessage;
use crate::error::Result;
use crate::ui::{ConfirmPrompter, StringPrompter};

pub const COMMIT_PROMPT: &str = "What is the name of the commit?";

/// Confirmation question shown before any module is touched
pub fn confirmation_text(message: &CommitMessage) -> String {
    match message.as_deref() {
        Some(text) => format!("Want to set the shift name to {}?", text),
        None => "Want to set the shift name to Module [name_module]?".to_string(),
    }
}

/// Ask for the commit message (unless `preset`) and confirm it (unless `assume_yes`).
///
/// # Returns
/// * `Ok(Some(message))` - operator accepted; the message may be empty
/// * `Ok(None)` - operator declined, nothing must be done
/// * `Err` - the terminal could not be read
pub fn collect_commit_message<P, C>(
    preset: Option<&str>,
    assume_yes: bool,
    prompter: &mut P,
    confirmer: &mut C,
) -> Result<Option<CommitMessage>>
where
    P: StringPrompter + ?Sized,
    C: ConfirmPrompter + ?Sized,
{
    let raw = match preset {
        Some(text) => text.to_string(),
        None => prompter.prompt(COMMIT_PROMPT, "")?,
    };
    let message = CommitMessage::from_input(&raw);

    if assume_yes || confirmer.confirm(&confirmation_text(&message), false)? {
        Ok(Some(message))
    } else {
        Ok(None)
    }
}
