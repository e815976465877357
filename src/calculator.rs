use crate::domain::{latest_tag, IncrementPolicy, TagScan, VersionTag};
use crate::error::Result;
use crate::git::Vcs;
use std::path::Path;
use tracing::debug;

/// Computes the next release tag of a module
#[derive(Debug, Clone)]
pub struct VersionCalculator {
    policy: IncrementPolicy,
    initial: VersionTag,
}

/// Latest tag found in a module and the tag that follows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextTag {
    pub scan: TagScan,
    pub next: VersionTag,
}

impl VersionCalculator {
    /// Create a calculator for a fixed policy; `initial` is used for untagged modules
    pub fn new(policy: IncrementPolicy, initial: VersionTag) -> Self {
        VersionCalculator { policy, initial }
    }

    pub fn policy(&self) -> IncrementPolicy {
        self.policy
    }

    /// Tag that follows `latest`, or the initial tag when there is none
    pub fn next_after(&self, latest: Option<&VersionTag>) -> Result<VersionTag> {
        match latest {
            Some(tag) => Ok(VersionTag::new(self.policy.apply(tag.version())?)),
            None => Ok(self.initial.clone()),
        }
    }

    /// Read the module's tags and compute the next one
    pub fn next_for_module<V: Vcs>(&self, vcs: &V, module_path: &Path) -> Result<NextTag> {
        let names = vcs.list_tags(module_path)?;
        let scan = latest_tag(names.as_slice());
        let next = self.next_after(scan.latest.as_ref())?;

        debug!(
            path = %module_path.display(),
            latest = ?scan.latest.as_ref().map(|t| t.to_string()),
            next = %next,
            policy = %self.policy,
            "computed next tag"
        );

        Ok(NextTag { scan, next })
    }
}
