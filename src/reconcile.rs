//! The reconciliation algorithm: stage, rebuild on base, decide create vs.
//! update vs. none.

use crate::error::ReconcileError;
use crate::fetch::Fetcher;
use crate::staging::Staging;
use crate::vcs::VcsDriver;

/// Suffix appended to the requested branch name to derive the scratch
/// branch used while building the candidate tip. Never pushed.
const TEMP_BRANCH_SUFFIX: &str = "--reconcile-temp";

/// What the reconciler did to the local `branch_name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No local branch was created or moved; nothing for the caller to push.
    None,
    /// `branch_name` was created fresh, rooted on the current base tip.
    Created,
    /// `branch_name` already existed and was moved to a new tip.
    Updated,
}

/// Inputs to a single reconcile call.
#[derive(Debug, Clone)]
pub struct ReconcileRequest {
    pub commit_message: String,
    /// Empty means "use the current branch as the base" (legacy mode).
    pub base_name: String,
    pub branch_name: String,
    pub signoff: bool,
}

impl ReconcileRequest {
    pub fn new(
        commit_message: impl Into<String>,
        base_name: impl Into<String>,
        branch_name: impl Into<String>,
    ) -> Self {
        Self {
            commit_message: commit_message.into(),
            base_name: base_name.into(),
            branch_name: branch_name.into(),
            signoff: false,
        }
    }

    pub fn signed_off(mut self) -> Self {
        self.signoff = true;
        self
    }
}

/// Result of a reconcile call.
///
/// `has_diff_with_base` is only meaningful when `action != Action::None`;
/// it is always `false` when `action == Action::None`, but callers should
/// not rely on that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub action: Action,
    pub has_diff_with_base: bool,
}

impl ReconcileOutcome {
    fn none() -> Self {
        Self {
            action: Action::None,
            has_diff_with_base: false,
        }
    }
}

pub struct Reconciler;

impl Reconciler {
    /// Stage any uncommitted changes, rebuild `req.branch_name` on top of
    /// `req.base_name` (or the current branch, in legacy mode), and decide
    /// whether the branch needs to be created, updated, or left alone.
    ///
    /// Cleanup (temp branch deletion, HEAD restoration to the original
    /// working base) always runs, on both the success and failure paths.
    pub fn create_or_update_branch(
        driver: &dyn VcsDriver,
        req: &ReconcileRequest,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        if !driver.identity_configured() {
            return Err(ReconcileError::MissingIdentity);
        }

        let working_base = driver
            .symbolic_ref_head()?
            .ok_or(ReconcileError::DetachedHead)?;

        let base = if req.base_name.is_empty() {
            working_base.clone()
        } else {
            req.base_name.clone()
        };
        let wbnb = working_base != base;
        let temp_branch = format!("{}{TEMP_BRANCH_SUFFIX}", req.branch_name);

        if driver.branch_exists(&temp_branch)? {
            return Err(ReconcileError::TempBranchAlreadyExists(temp_branch));
        }

        let working_base_tip = driver.rev_parse(&working_base)?;

        let result = Self::build_and_decide(
            driver,
            req,
            &working_base,
            &base,
            wbnb,
            &temp_branch,
            working_base_tip.as_str(),
        );

        // Phase E: always executed, best effort. A failure here must not
        // mask the original error or result. Rewinding to the pre-staging
        // tip is a no-op when no staging commit was made, so it is safe to
        // run unconditionally rather than threading that fact through the
        // error path.
        let _ = driver.checkout(&working_base, None);
        let _ = driver.reset_soft(working_base_tip.as_str());
        let _ = driver.branch_delete(&temp_branch, true);

        result
    }

    fn build_and_decide(
        driver: &dyn VcsDriver,
        req: &ReconcileRequest,
        working_base: &str,
        base: &str,
        wbnb: bool,
        temp_branch: &str,
        working_base_tip: &str,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        // Phase A: snapshot working changes.
        let staging = Staging::stage_all_changes(driver, &req.commit_message, req.signoff)?;

        // Phase B: resolve base.
        Fetcher::try_fetch(driver, base);
        let base_remote_ref = driver.remote_ref(base);

        if wbnb {
            driver.checkout(base, Some(&base_remote_ref))?;
        }

        // Phase C: construct the candidate tip on the scratch branch.
        driver.branch_reset(temp_branch, &base_remote_ref)?;
        driver.checkout(temp_branch, None)?;

        // Replay commits unique to the working base (made during the
        // workflow, before staging ran) onto the freshly-fetched base tip.
        // This applies whether or not the working base is the base itself:
        // in legacy mode it catches local-only commits up with a remote
        // that has moved; in WBNB mode it carries the workflow's commits
        // across onto the real base.
        let workflow_commits = driver.commits_between(&base_remote_ref, working_base_tip)?;
        for commit in &workflow_commits {
            driver.cherry_pick(commit, true)?;
        }

        if let Some(staged) = &staging.staged_commit {
            driver.cherry_pick(staged, true)?;
        }

        // Phase D: decide create vs update vs none.
        let pr_exists = Fetcher::try_fetch(driver, &req.branch_name);

        if !pr_exists {
            if driver.trees_match(temp_branch, &base_remote_ref)? {
                return Ok(ReconcileOutcome::none());
            }
            driver.branch_reset(&req.branch_name, temp_branch)?;
            return Ok(ReconcileOutcome {
                action: Action::Created,
                has_diff_with_base: true,
            });
        }

        let branch_remote_ref = driver.remote_ref(&req.branch_name);
        if driver.trees_match(temp_branch, &branch_remote_ref)? {
            return Ok(ReconcileOutcome::none());
        }

        driver.branch_reset(&req.branch_name, temp_branch)?;
        let has_diff_with_base = !driver.trees_match(temp_branch, &base_remote_ref)?;
        Ok(ReconcileOutcome {
            action: Action::Updated,
            has_diff_with_base,
        })
    }
}
