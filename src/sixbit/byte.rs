//! Single six-bit byte.
//!
//! A MIX byte holds an unsigned digit in 0..=63. The original hardware only
//! promised "at least 64 values" per byte; this emulator fixes the binary
//! interpretation (six bits) and masks every write, so a byte can never
//! hold an out-of-range digit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single six-bit MIX byte (0..=63).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Byte(u8);

impl Byte {
    /// Number of bits in a byte.
    pub const N_BITS: u32 = 6;

    /// Largest value a byte can hold.
    pub const MAX: u8 = 0b11_1111;

    const MASK: u8 = 0b11_1111;

    /// Create a byte from the low six bits of `value`.
    #[inline]
    pub const fn new(value: u8) -> Self {
        Self(value & Self::MASK)
    }

    /// Create a zero byte.
    #[inline]
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the digit value.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns true if this byte is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<u8> for Byte {
    fn from(value: u8) -> Self {
        Byte::new(value)
    }
}

impl From<Byte> for u8 {
    fn from(byte: Byte) -> Self {
        byte.value()
    }
}

impl fmt::Debug for Byte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Byte({})", self.0)
    }
}

impl fmt::Display for Byte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}
