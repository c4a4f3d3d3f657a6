use std::fmt;
use std::str::FromStr;

use crate::BruteError;

/// Symbols used for nonce values unless configured otherwise.
pub const DEFAULT_ALPHABET: &str = "0123456789";

const NOT_A_SYMBOL: u8 = u8::MAX;

/// The symbol set of a positional numeral system used to render candidates.
///
/// Symbol `i` has digit value `i`, so the first symbol plays the role of zero
/// and is used for padding. Symbols are printable, non-space ASCII so a
/// rendered value can never break the header line it lives on.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Box<[u8]>,
    digits: [u8; 256],
}

impl Alphabet {
    pub fn new(symbols: &str) -> Result<Self, BruteError> {
        let invalid = |reason| BruteError::InvalidAlphabet {
            alphabet: symbols.to_owned(),
            reason,
        };

        let bytes = symbols.as_bytes();
        if bytes.len() < 2 {
            return Err(invalid("needs at least two symbols"));
        }

        let mut digits = [NOT_A_SYMBOL; 256];
        for (value, &symbol) in bytes.iter().enumerate() {
            if !symbol.is_ascii_graphic() {
                return Err(invalid("symbols must be printable ASCII other than space"));
            }
            if digits[symbol as usize] != NOT_A_SYMBOL {
                return Err(invalid("symbols must be distinct"));
            }
            // At most 94 graphic ASCII symbols, so the value fits.
            digits[symbol as usize] = value as u8;
        }

        Ok(Self {
            symbols: bytes.into(),
            digits,
        })
    }

    pub fn radix(&self) -> u64 {
        self.symbols.len() as u64
    }

    /// The symbol for digit value zero.
    pub fn zero(&self) -> u8 {
        self.symbols[0]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.symbols
    }

    /// Write `value` right-aligned into `slot`, padding higher positions with
    /// the zero symbol.
    ///
    /// Returns `false` if `value` needs more positions than `slot` has; the
    /// slot's contents are unspecified in that case.
    pub fn write(&self, mut value: u64, slot: &mut [u8]) -> bool {
        let radix = self.radix();
        for pos in slot.iter_mut().rev() {
            *pos = self.symbols[(value % radix) as usize];
            value /= radix;
        }
        value == 0
    }

    /// Parse a value written by [`write`](Alphabet::write).
    ///
    /// Returns `None` for foreign symbols or values that overflow `u64`.
    pub fn read(&self, slot: &[u8]) -> Option<u64> {
        let radix = self.radix();
        slot.iter().try_fold(0u64, |acc, &symbol| {
            let digit = self.digits[symbol as usize];
            if digit == NOT_A_SYMBOL {
                return None;
            }
            acc.checked_mul(radix)?.checked_add(u64::from(digit))
        })
    }

    /// Minimum number of positions needed to write `value` (at least one).
    pub fn width_of(&self, mut value: u64) -> usize {
        let mut width = 1;
        while value >= self.radix() {
            value /= self.radix();
            width += 1;
        }
        width
    }

    /// Number of distinct values a field of `width` positions can hold,
    /// or `None` if that exceeds `u64`.
    pub fn capacity(&self, width: usize) -> Option<u64> {
        let width = u32::try_from(width).ok()?;
        self.radix().checked_pow(width)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        let mut digits = [NOT_A_SYMBOL; 256];
        for (value, &symbol) in DEFAULT_ALPHABET.as_bytes().iter().enumerate() {
            digits[symbol as usize] = value as u8;
        }
        Self {
            symbols: DEFAULT_ALPHABET.as_bytes().into(),
            digits,
        }
    }
}

impl FromStr for Alphabet {
    type Err = BruteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Validated as ASCII on construction.
        for &symbol in self.symbols.iter() {
            fmt::Write::write_char(f, char::from(symbol))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Alphabet({:?})", self.to_string())
    }
}
