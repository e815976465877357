//! Domain logic - pure rules independent of git invocations

pub mod module;
pub mod tag;
pub mod version;

pub use module::{CommitMessage, Module};
pub use tag::{latest_tag, TagScan, VersionTag};
pub use version::IncrementPolicy;
