//! Six-bit sign-magnitude number primitives.
//!
//! This module provides the core types of the MIX word format:
//! - [`Byte`] - A single six-bit digit (0..=63)
//! - [`Word`] - A five-byte sign-magnitude word (the universal MIX value)
//! - [`FieldSpec`] - A packed byte-range specification into a word

mod byte;
mod field;
mod word;

pub use byte::Byte;
pub use field::FieldSpec;
pub use word::Word;
