//! Captures the working tree's uncommitted content as a single commit.

use crate::error::ReconcileError;
use crate::vcs::{CommitId, CommitOptions, StageOptions, VcsDriver};

/// Outcome of a staging attempt.
#[derive(Debug, Clone)]
pub struct StagingResult {
    pub had_changes: bool,
    pub staged_commit: Option<CommitId>,
}

/// Produces the staging commit. No stashing is involved: the commit itself
/// is the staging mechanism.
pub struct Staging;

impl Staging {
    /// Stage every tracked and untracked change and commit it with
    /// `message`, applying `signoff` if requested.
    ///
    /// Returns `had_changes: false` and touches nothing if the working tree
    /// is already clean.
    pub fn stage_all_changes(
        driver: &dyn VcsDriver,
        message: &str,
        signoff: bool,
    ) -> Result<StagingResult, ReconcileError> {
        if !driver.is_dirty(true)? {
            return Ok(StagingResult {
                had_changes: false,
                staged_commit: None,
            });
        }

        driver.add(&StageOptions::all())?;

        let mut opts = CommitOptions::with_message(message);
        if signoff {
            opts = opts.signed_off();
        }
        let commit = driver.commit(&opts)?;

        Ok(StagingResult {
            had_changes: true,
            staged_commit: Some(commit),
        })
    }
}
