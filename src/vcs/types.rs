use std::fmt;

/// An opaque, content-addressed commit identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity the driver commits as. Constructed once by the caller and never
/// mutated; no environment variables or config files are consulted by the
/// engine or the default driver to fill this in.
#[derive(Debug, Clone)]
pub struct VcsConfig {
    pub author_name: String,
    pub author_email: String,
    pub committer_name: String,
    pub committer_email: String,
    pub remote_name: String,
}

impl VcsConfig {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        let name = name.into();
        let email = email.into();
        Self {
            author_name: name.clone(),
            author_email: email.clone(),
            committer_name: name,
            committer_email: email,
            remote_name: "origin".to_string(),
        }
    }

    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote_name = remote.into();
        self
    }
}

/// What to stage before committing.
#[derive(Debug, Clone, Default)]
pub struct StageOptions {
    /// Stage every tracked and untracked change (`git add -A`).
    pub all: bool,
}

impl StageOptions {
    pub fn all() -> Self {
        Self { all: true }
    }
}

/// Commit author override. When absent, the driver's configured identity is
/// used.
#[derive(Debug, Clone)]
pub struct CommitAuthor {
    pub name: String,
    pub email: String,
}

impl CommitAuthor {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Options controlling a single commit.
#[derive(Debug, Clone, Default)]
pub struct CommitOptions {
    pub message: String,
    pub allow_empty: bool,
    pub signoff: bool,
    pub no_verify: bool,
    pub author: Option<CommitAuthor>,
}

impl CommitOptions {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn signed_off(mut self) -> Self {
        self.signoff = true;
        self
    }

    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    pub fn no_verify(mut self) -> Self {
        self.no_verify = true;
        self
    }
}

/// Result of a cherry-pick attempt. An empty pick is not an error: the
/// engine inspects this variant rather than catching a generic failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CherryPickOutcome {
    Applied(CommitId),
    Empty,
}

/// Options for a push. The engine itself never calls push; this exists for
/// drivers and callers that want a typed shape for the caller-side push step.
#[derive(Debug, Clone, Default)]
pub struct PushOptions {
    pub force: bool,
    pub set_upstream: bool,
}
