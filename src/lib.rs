//! Branch reconciliation engine.
//!
//! Given a repository checkout whose working tree may carry uncommitted
//! changes, this crate stages those changes, rebuilds a pull-request branch
//! on top of a base branch, and decides whether the branch needs to be
//! created, updated, or left alone.
//!
//! Global state: none. Every entry point takes its [`vcs::VcsDriver`] as a
//! parameter; there is no process-wide repository handle.
//!
//! Version control is accessed exclusively through the [`vcs::VcsDriver`]
//! trait. [`vcs::process::GitCliDriver`] is the one concrete implementation
//! shipped here, built on top of the `git` binary; callers may supply their
//! own.

pub mod error;
pub mod fetch;
pub mod reconcile;
pub mod staging;
pub mod vcs;

pub use error::ReconcileError;
pub use reconcile::{Action, ReconcileOutcome, ReconcileRequest, Reconciler};
pub use vcs::driver::VcsDriver;
pub use vcs::process::GitCliDriver;
pub use vcs::types::{CommitId, VcsConfig};
