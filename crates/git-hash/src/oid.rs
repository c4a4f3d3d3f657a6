use std::fmt;
use std::str::FromStr;

use crate::hex::{hex_decode, hex_encode};
use crate::{HashAlgorithm, HashError};

/// Longest hex rendering of any supported algorithm.
pub const MAX_HEX_LEN: usize = 64;

/// A git object identifier: the digest of an object's framed bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectId {
    Sha1([u8; 20]),
    Sha256([u8; 32]),
}

impl ObjectId {
    /// Parse a full-length hex id. The algorithm is inferred from the length.
    pub fn from_hex(hex: &str) -> Result<Self, HashError> {
        match HashAlgorithm::from_hex_len(hex.len()) {
            Some(HashAlgorithm::Sha1) => {
                let mut bytes = [0u8; 20];
                hex_decode(hex, &mut bytes)?;
                Ok(Self::Sha1(bytes))
            }
            Some(HashAlgorithm::Sha256) => {
                let mut bytes = [0u8; 32];
                hex_decode(hex, &mut bytes)?;
                Ok(Self::Sha256(bytes))
            }
            None => Err(HashError::InvalidHexLength {
                expected: HashAlgorithm::Sha1.hex_len(),
                actual: hex.len(),
            }),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Sha1(b) => b,
            Self::Sha256(b) => b,
        }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        match self {
            Self::Sha1(_) => HashAlgorithm::Sha1,
            Self::Sha256(_) => HashAlgorithm::Sha256,
        }
    }

    /// Render lowercase hex into `buf` without allocating.
    pub fn hex_into<'a>(&self, buf: &'a mut [u8; MAX_HEX_LEN]) -> &'a [u8] {
        hex_encode(self.as_bytes(), buf)
    }

    pub fn to_hex(&self) -> String {
        let mut buf = [0u8; MAX_HEX_LEN];
        self.hex_into(&mut buf).iter().copied().map(char::from).collect()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", &self.to_hex()[..8])
    }
}

impl FromStr for ObjectId {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
