//! Lowercase hex rendering and parsing of raw digests.

use crate::HashError;

const HEX_ENCODE: &[u8; 16] = b"0123456789abcdef";

fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Hex-encode `bytes` into the front of `buf` and return the written slice.
///
/// # Panics
///
/// Panics if `buf` is shorter than `bytes.len() * 2`.
pub fn hex_encode<'a>(bytes: &[u8], buf: &'a mut [u8]) -> &'a [u8] {
    let out = &mut buf[..bytes.len() * 2];
    for (pair, &b) in out.chunks_exact_mut(2).zip(bytes) {
        pair[0] = HEX_ENCODE[(b >> 4) as usize];
        pair[1] = HEX_ENCODE[(b & 0x0f) as usize];
    }
    out
}

/// Hex-encode `bytes` to a new `String`.
pub fn hex_to_string(bytes: &[u8]) -> String {
    let mut buf = vec![0u8; bytes.len() * 2];
    hex_encode(bytes, &mut buf);
    buf.into_iter().map(char::from).collect()
}

/// Decode `hex` into `buf`; the hex length must be exactly `buf.len() * 2`.
pub fn hex_decode(hex: &str, buf: &mut [u8]) -> Result<(), HashError> {
    let hex = hex.as_bytes();
    if hex.len() != buf.len() * 2 {
        return Err(HashError::InvalidHexLength {
            expected: buf.len() * 2,
            actual: hex.len(),
        });
    }
    let digit = |pos: usize| {
        nibble(hex[pos]).ok_or(HashError::InvalidHex {
            position: pos,
            character: hex[pos] as char,
        })
    };
    for (i, out) in buf.iter_mut().enumerate() {
        *out = (digit(i * 2)? << 4) | digit(i * 2 + 1)?;
    }
    Ok(())
}
