use super::error::VcsError;
use super::types::{CherryPickOutcome, CommitId, CommitOptions, PushOptions, StageOptions};

/// The abstract version-control boundary the reconciliation engine is built
/// against. The engine makes no assumption about how an implementation
/// talks to the underlying tool; [`super::process::GitCliDriver`] is the one
/// implementation shipped in this crate.
pub trait VcsDriver {
    /// Fetch `refspec` from the configured remote. Returns `Ok(())` on
    /// success; any failure (network, missing ref, permission) is reported
    /// as an error here, but callers at the [`crate::fetch::Fetcher`] layer
    /// are expected to absorb it rather than propagate it.
    fn fetch(&self, refspec: &str) -> Result<(), VcsError>;

    /// Switch HEAD to `name`. If `start_point` is given and `name` does not
    /// exist locally yet, create it there first.
    fn checkout(&self, name: &str, start_point: Option<&str>) -> Result<(), VcsError>;

    /// Create or reset `name` to point at `start_point`, without switching
    /// HEAD to it.
    fn branch_reset(&self, name: &str, start_point: &str) -> Result<(), VcsError>;

    /// Move the currently checked-out branch's tip to `to`, keeping the
    /// index and working tree untouched (`git reset --soft`). Used to
    /// rewind the staging commit after its content has been published.
    fn reset_soft(&self, to: &str) -> Result<(), VcsError>;

    /// The branch HEAD currently points to, or `None` if HEAD is detached.
    fn symbolic_ref_head(&self) -> Result<Option<String>, VcsError>;

    /// Resolve `rev` to a [`CommitId`].
    fn rev_parse(&self, rev: &str) -> Result<CommitId, VcsError>;

    /// The canonical remote-tracking ref for a branch name, e.g.
    /// `origin/main` for `main`. Used by the reconciler to name the ref it
    /// compares against after a fetch.
    fn remote_ref(&self, branch: &str) -> String;

    /// Whether the working tree has any uncommitted change, optionally
    /// including untracked files.
    fn is_dirty(&self, include_untracked: bool) -> Result<bool, VcsError>;

    /// Stage changes per `opts`.
    fn add(&self, opts: &StageOptions) -> Result<(), VcsError>;

    /// Commit currently staged content. Returns the new commit id.
    fn commit(&self, opts: &CommitOptions) -> Result<CommitId, VcsError>;

    /// Cherry-pick `id` onto HEAD, tolerating an empty result.
    fn cherry_pick(&self, id: &CommitId, allow_empty: bool) -> Result<CherryPickOutcome, VcsError>;

    /// Delete a local branch.
    fn branch_delete(&self, name: &str, force: bool) -> Result<(), VcsError>;

    /// Whether `name` exists as a local branch.
    fn branch_exists(&self, name: &str) -> Result<bool, VcsError>;

    /// Paths that differ between `a` and `b`. Empty iff trees are equal.
    fn diff_name_only(&self, a: &str, b: &str) -> Result<Vec<String>, VcsError>;

    /// Cheap tree-equality check between two refs, without materializing a
    /// diff. Equivalent to comparing `<a>^{tree}` against `<b>^{tree}`.
    fn trees_match(&self, a: &str, b: &str) -> Result<bool, VcsError>;

    /// List commits from `base` (exclusive) to `head` (inclusive), oldest
    /// first.
    fn commits_between(&self, base: &str, head: &str) -> Result<Vec<CommitId>, VcsError>;

    /// Push `refspec`, out of scope for the engine itself but part of the
    /// driver contract so a caller can use the same abstraction end to end.
    fn push(&self, refspec: &str, opts: &PushOptions) -> Result<(), VcsError>;

    /// Save a stash entry. Present for contract completeness; the shipped
    /// `Staging` implementation never calls this.
    fn stash_save(&self, message: &str, include_untracked: bool) -> Result<(), VcsError>;

    /// Restore the most recent stash entry.
    fn stash_pop(&self) -> Result<(), VcsError>;

    /// Whether a commit author/committer identity has been configured.
    /// Checked by the reconciler as a precondition before any commit is
    /// attempted.
    fn identity_configured(&self) -> bool;
}
