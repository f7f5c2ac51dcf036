use std::fmt;

/// Failure surfaced by a [`super::VcsDriver`] method.
#[derive(Debug, Clone)]
pub enum VcsError {
    /// The underlying command exited non-zero.
    CommandFailed { command: String, stderr: String },
    /// Output from the underlying tool could not be interpreted.
    ParseError(String),
}

impl fmt::Display for VcsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VcsError::CommandFailed { command, stderr } => {
                write!(f, "command `{command}` failed: {}", stderr.trim())
            }
            VcsError::ParseError(msg) => write!(f, "failed to parse vcs output: {msg}"),
        }
    }
}

impl std::error::Error for VcsError {}
