//! Field specifications.
//!
//! A field spec names a contiguous byte range `(left:right)` within a word,
//! packed into a single byte as `8 * left + right`. Position 0 is the sign;
//! positions 1..=5 are the bytes, most significant first. The modifier byte
//! of an instruction carries a field spec for the load/store/arithmetic
//! family, and a plain sub-mode number for everything else; the same type
//! serves both uses via [`FieldSpec::from_modifier`] / [`FieldSpec::as_modifier`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// A packed byte-range specification `(left:right)`.
///
/// No validation is performed anywhere in this type: `left <= right <= 5`
/// is a caller obligation, exactly as on the original machine.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSpec(u8);

impl FieldSpec {
    /// Pack a `(left:right)` range.
    #[inline]
    pub const fn new(left: u8, right: u8) -> Self {
        Self(8 * left + right)
    }

    /// Reinterpret a raw instruction modifier byte as a field spec.
    #[inline]
    pub const fn from_modifier(modifier: u8) -> Self {
        Self(modifier)
    }

    /// The whole word including sign: `(0:5)`.
    #[inline]
    pub const fn all() -> Self {
        Self::new(0, 5)
    }

    /// Left end of the range (0 = the sign position).
    #[inline]
    pub const fn left(self) -> u8 {
        self.0 / 8
    }

    /// Right end of the range.
    #[inline]
    pub const fn right(self) -> u8 {
        self.0 % 8
    }

    /// The raw modifier byte this spec packs into.
    #[inline]
    pub const fn as_modifier(self) -> u8 {
        self.0
    }

    /// Whether the range covers the sign position.
    #[inline]
    pub const fn includes_sign(self) -> bool {
        self.left() == 0
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldSpec({}:{})", self.left(), self.right())
    }
}
