//! Tolerant remote-ref refresh.

use crate::vcs::VcsDriver;

/// Brings a remote ref up to date, absorbing any failure. Existence of a
/// remote branch is informational input to the reconciler, never a
/// precondition, so a missing ref or network failure is not fatal here.
pub struct Fetcher;

impl Fetcher {
    /// Attempt to fetch `refname` from the configured remote.
    ///
    /// Returns `true` on success, `false` on any failure. Never propagates
    /// an error.
    pub fn try_fetch(driver: &dyn VcsDriver, refname: &str) -> bool {
        match driver.fetch(refname) {
            Ok(()) => true,
            Err(_) => false,
        }
    }
}
