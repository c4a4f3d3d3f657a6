//! Hash algorithms, object ids, and hex rendering for gitbrute.
//!
//! The search core hashes millions of candidate objects, so the
//! [`Hasher`](hasher::Hasher) here is reusable across candidates and its
//! finalize step is infallible. [`ObjectId`] carries the resulting digest
//! and renders it as lowercase hex without allocating.

mod algorithm;
mod error;
pub mod hasher;
pub mod hex;
mod oid;

pub use algorithm::HashAlgorithm;
pub use error::HashError;
pub use oid::{ObjectId, MAX_HEX_LEN};
