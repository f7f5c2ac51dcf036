//! The abstract version-control boundary the engine is built against.

pub mod driver;
pub mod error;
pub mod process;
pub mod types;

pub use driver::VcsDriver;
pub use error::VcsError;
pub use types::{
    CherryPickOutcome, CommitAuthor, CommitId, CommitOptions, PushOptions, StageOptions,
    VcsConfig,
};
