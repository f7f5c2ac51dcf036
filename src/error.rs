use std::fmt;

use crate::vcs::VcsError;

/// Top-level failure from [`crate::reconcile::Reconciler::create_or_update_branch`].
#[derive(Debug)]
pub enum ReconcileError {
    /// A [`VcsDriver`](crate::vcs::VcsDriver) call failed unexpectedly.
    Vcs(VcsError),
    /// HEAD was detached at entry; the engine requires a named working base.
    DetachedHead,
    /// The reserved scratch branch name already exists and was not created
    /// by this invocation.
    TempBranchAlreadyExists(String),
    /// No commit identity was configured.
    MissingIdentity,
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileError::Vcs(e) => write!(f, "{e}"),
            ReconcileError::DetachedHead => {
                write!(f, "HEAD is detached; reconcile requires a branch checked out")
            }
            ReconcileError::TempBranchAlreadyExists(name) => {
                write!(f, "scratch branch `{name}` already exists")
            }
            ReconcileError::MissingIdentity => {
                write!(f, "no commit author/committer identity configured")
            }
        }
    }
}

impl std::error::Error for ReconcileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReconcileError::Vcs(e) => Some(e),
            _ => None,
        }
    }
}

impl From<VcsError> for ReconcileError {
    fn from(e: VcsError) -> Self {
        ReconcileError::Vcs(e)
    }
}
