//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - `prompt` - Interactive prompts behind traits

pub mod formatter;
pub mod prompt;

pub use formatter::{
    display_boundary_warning, display_error, display_module_report, display_status,
    display_success, display_summary,
};
pub use prompt::{
    ConfirmPrompter, DialoguerConfirmPrompter, DialoguerStringPrompter, StringPrompter,
};
