//! Fixed-width sign-magnitude words.
//!
//! A MIX word is five six-bit bytes plus a separate sign bit. Byte 0 is the
//! least significant; the numeric value is `±(sum of bytes[i] * 64^i)`.
//! Because the sign lives outside the magnitude there are two distinct
//! zeros, `+0` and `-0`: they are numerically equal but bit-distinct (the
//! derived `PartialEq` compares bits and tells them apart).
//!
//! Every word can also be read as an instruction: byte 0 is the opcode,
//! byte 1 the modifier (a packed [`FieldSpec`] or a sub-mode), byte 2 the
//! index specifier, and bytes 3-4 together with the word's sign form the
//! address.

use crate::sixbit::{Byte, FieldSpec};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A five-byte sign-magnitude MIX word.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Word {
    /// Sign bit, stored separately from the magnitude.
    negative: bool,
    /// Bytes stored from least significant (index 0) to most significant (index 4).
    bytes: [Byte; 5],
}

impl Word {
    /// Number of bytes in a word.
    pub const N_BYTES: usize = 5;

    /// Number of magnitude bits in a word.
    pub const N_BITS: u32 = Self::N_BYTES as u32 * Byte::N_BITS;

    /// Maximum value: +1,073,741,823 (all bytes 63).
    pub const MAX: i32 = (1 << Self::N_BITS) - 1;

    /// Minimum value: -1,073,741,823.
    pub const MIN: i32 = -Self::MAX;

    // Instruction sub-layout.
    const OPCODE_BYTE: usize = 0;
    const MOD_BYTE: usize = 1;
    const INDEX_BYTE: usize = 2;
    const ADDR_LOW_BYTE: usize = 3;
    const ADDR_HIGH_BYTE: usize = 4;

    /// Create the positive zero word.
    #[inline]
    pub const fn zero() -> Self {
        Self {
            negative: false,
            bytes: [Byte::zero(); 5],
        }
    }

    /// Create a word from a magnitude and an explicit sign.
    ///
    /// Each byte takes six bits of `abs`; anything above bit 30 is dropped,
    /// the same truncation every byte write performs.
    pub fn from_parts(abs: u32, negative: bool) -> Self {
        let mut bytes = [Byte::zero(); 5];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = Byte::new((abs >> (i as u32 * Byte::N_BITS)) as u8);
        }
        Self { negative, bytes }
    }

    /// Create a word from a signed integer (magnitude plus derived sign).
    pub fn from_i32(value: i32) -> Self {
        Self::from_parts(value.unsigned_abs(), value < 0)
    }

    /// Create an instruction word.
    ///
    /// The address sign becomes the word's sign; its magnitude fills
    /// bytes 3-4. This doubles as the raw four-field constructor for
    /// diagnostic use: all byte positions are reachable.
    pub fn instruction(opcode: u8, addr: i32, index: u8, modifier: u8) -> Self {
        let abs_addr = addr.unsigned_abs();
        let mut bytes = [Byte::zero(); 5];
        bytes[Self::OPCODE_BYTE] = Byte::new(opcode);
        bytes[Self::MOD_BYTE] = Byte::new(modifier);
        bytes[Self::INDEX_BYTE] = Byte::new(index);
        bytes[Self::ADDR_LOW_BYTE] = Byte::new(abs_addr as u8);
        bytes[Self::ADDR_HIGH_BYTE] = Byte::new((abs_addr >> Byte::N_BITS) as u8);
        Self {
            negative: addr < 0,
            bytes,
        }
    }

    /// The sign bit.
    #[inline]
    pub const fn negative(&self) -> bool {
        self.negative
    }

    /// The magnitude, ignoring the sign.
    pub fn abs_value(&self) -> u32 {
        let mut val = 0u32;
        for (i, byte) in self.bytes.iter().enumerate() {
            val |= (byte.value() as u32) << (i as u32 * Byte::N_BITS);
        }
        val
    }

    /// The signed numeric value.
    pub fn value(&self) -> i32 {
        let abs = self.abs_value() as i32;
        if self.negative {
            -abs
        } else {
            abs
        }
    }

    /// Returns true if the magnitude is zero (either of the two zeros).
    pub fn is_zero(&self) -> bool {
        self.bytes.iter().all(|b| b.is_zero())
    }

    /// Get a single byte by index (0 = least significant).
    #[inline]
    pub fn byte(&self, index: usize) -> Byte {
        self.bytes[index]
    }

    /// The opcode byte of this word read as an instruction.
    #[inline]
    pub fn opcode(&self) -> u8 {
        self.bytes[Self::OPCODE_BYTE].value()
    }

    /// The modifier byte (field spec or sub-mode) of this word read as an
    /// instruction.
    #[inline]
    pub fn modifier(&self) -> u8 {
        self.bytes[Self::MOD_BYTE].value()
    }

    /// The index-specifier byte of this word read as an instruction.
    #[inline]
    pub fn index_spec(&self) -> u8 {
        self.bytes[Self::INDEX_BYTE].value()
    }

    /// The signed address of this word read as an instruction: the two-byte
    /// magnitude in bytes 3-4, with the word's sign.
    pub fn address(&self) -> i32 {
        let abs = self.bytes[Self::ADDR_LOW_BYTE].value() as i32
            | (self.bytes[Self::ADDR_HIGH_BYTE].value() as i32) << Byte::N_BITS;
        if self.negative {
            -abs
        } else {
            abs
        }
    }

    /// Flip the sign bit, leaving the magnitude unchanged.
    ///
    /// Sign-magnitude negation: `-(+0)` is `-0`, a distinct bit pattern.
    #[inline]
    pub fn neg(&self) -> Self {
        Self {
            negative: !self.negative,
            bytes: self.bytes,
        }
    }

    /// Extract the byte range named by `spec` as a standalone word.
    ///
    /// When `left == 0` the range covers `right - left` bytes and the sign
    /// is copied; otherwise it covers `right - left + 1` bytes and the
    /// result is positive. The selected bytes land right-justified in the
    /// low-order bytes of the result, exactly as if the field were read as
    /// a value of that byte width.
    ///
    /// A spec with `left > right` or components above 5 violates the
    /// contract of [`FieldSpec`]; no validation is performed and the
    /// resulting behavior is unspecified (typically a panic).
    pub fn field(&self, spec: FieldSpec) -> Word {
        let left = spec.left() as usize;
        let right = spec.right() as usize;
        let include_sign = left == 0;
        let n_bytes = right - left + usize::from(!include_sign);

        let mut result = Word::zero();
        for i in 0..n_bytes {
            result.bytes[i] = self.bytes[Self::N_BYTES - right + i];
        }
        if include_sign {
            result.negative = self.negative;
        }
        result
    }

    /// Overwrite the byte range named by `spec` with the low-order bytes of
    /// `src` (same byte-count rule as [`Word::field`]). The sign is
    /// overwritten only when `left == 0`; bytes outside the range are left
    /// unchanged.
    ///
    /// Spec validity is a caller precondition, as for [`Word::field`].
    pub fn set_field(&mut self, spec: FieldSpec, src: Word) {
        let left = spec.left() as usize;
        let right = spec.right() as usize;
        let include_sign = left == 0;
        let n_bytes = right - left + usize::from(!include_sign);

        for i in 0..n_bytes {
            self.bytes[Self::N_BYTES - right + i] = src.bytes[i];
        }
        if include_sign {
            self.negative = src.negative;
        }
    }
}

impl From<i32> for Word {
    fn from(value: i32) -> Self {
        Word::from_i32(value)
    }
}

impl std::ops::Neg for Word {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Word::neg(&self)
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({} = {})", self, self.value())
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.negative { '-' } else { '+' })?;
        for i in (0..Self::N_BYTES).rev() {
            write!(f, " {}", self.bytes[i])?;
        }
        Ok(())
    }
}
