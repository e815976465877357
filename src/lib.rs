pub mod boundary;
pub mod calculator;
pub mod cli;
pub mod config;
pub mod domain;
pub mod enumerate;
pub mod error;
pub mod git;
pub mod input;
pub mod logging;
pub mod publisher;
pub mod ui;

pub use error::{PushError, Result};
