//! Subprocess plumbing for driving the git executable.

pub mod error;
pub mod subprocess;

pub use error::UtilError;

pub type Result<T> = std::result::Result<T, UtilError>;
