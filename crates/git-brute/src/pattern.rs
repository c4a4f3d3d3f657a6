use git_hash::{ObjectId, MAX_HEX_LEN};
use regex::bytes::Regex;

use crate::BruteError;

/// Pattern used unless configured otherwise: seven leading binary digits.
pub const DEFAULT_PATTERN: &str = "^[01]{7}";

/// A compiled regex tested against the lowercase hex form of object ids.
///
/// Cloning is cheap; every worker holds its own handle to the same compiled
/// program.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, BruteError> {
        let regex = Regex::new(pattern).map_err(|source| BruteError::InvalidPattern {
            pattern: pattern.to_owned(),
            source: Box::new(source),
        })?;
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Test an already rendered lowercase hex digest.
    pub fn is_match_hex(&self, hex: &[u8]) -> bool {
        self.regex.is_match(hex)
    }

    /// Test an object id without allocating.
    pub fn matches(&self, oid: &ObjectId) -> bool {
        let mut buf = [0u8; MAX_HEX_LEN];
        self.is_match_hex(oid.hex_into(&mut buf))
    }
}
