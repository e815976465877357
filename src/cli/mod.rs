//! Command-line workflow, independent of argument parsing

pub mod orchestration;

pub use orchestration::{run_push_workflow, PushWorkflowArgs, RunResult, RunSummary};
