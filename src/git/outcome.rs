//! Recognises git commands that succeeded without changing anything.
//!
//! git reports success for an empty commit attempt and for a push with nothing
//! to send, so the only signal is the text it prints. Keep all of that
//! matching here.

use crate::config::MarkersConfig;
use crate::git::CommandOutput;

fn contains_any(output: &CommandOutput, markers: &[String]) -> bool {
    let text = output.combined();
    markers.iter().any(|marker| text.contains(marker.as_str()))
}

/// Whether `git commit` actually created a commit.
///
/// Anything other than a "nothing to commit" marker counts as a commit.
pub fn commit_happened(output: &CommandOutput, markers: &MarkersConfig) -> bool {
    !contains_any(output, &markers.nothing_to_commit)
}

/// Whether `git push` changed the remote.
pub fn push_changed_remote(output: &CommandOutput, markers: &MarkersConfig) -> bool {
    !contains_any(output, &markers.up_to_date)
}
