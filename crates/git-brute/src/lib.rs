//! Parallel nonce search for git object ids matching a hex pattern.
//!
//! A template object (usually a commit) gets a header field, `nonce` by
//! default, whose value is brute-forced until the object's id matches a
//! regex. The pieces, from producer to sink:
//!
//! - [`explore`]: the candidate enumerator feeding a bounded queue.
//! - [`field`]: locating, creating, and widening the nonce field.
//! - [`worker`]: render a candidate, hash, test, repeat.
//! - [`gate`]: first-match cancellation and single-use publish.
//! - [`search`]: the worker pool and its [`Winner`].

mod alphabet;
mod error;
pub mod explore;
pub mod field;
pub mod gate;
mod pattern;
pub mod search;
pub mod worker;

pub use alphabet::{Alphabet, DEFAULT_ALPHABET};
pub use error::BruteError;
pub use field::FieldDescriptor;
pub use gate::CancellationGate;
pub use pattern::{Pattern, DEFAULT_PATTERN};
pub use search::{Search, SearchConfig, Winner};

pub type Result<T> = std::result::Result<T, BruteError>;
