//! MIX register file.
//!
//! The machine has nine registers plus two pieces of control state:
//! - A: accumulator (full word)
//! - X: extension register (full word, low half of the AX pair)
//! - I1..I6: index registers (full words, conventionally small addresses)
//! - J: jump register (return addresses)
//! - pc: program counter (a plain integer, not a word)
//! - comparison indicator: LESS / EQUAL / GREATER

use crate::cpu::decode::Reg;
use crate::sixbit::Word;
use serde::{Deserialize, Serialize};

/// Result of a compare instruction, consumed by conditional jumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    Less,
    Equal,
    Greater,
}

impl Comparison {
    /// Order two words by numeric value. The two zeros compare equal.
    pub fn of(lhs: Word, rhs: Word) -> Self {
        match lhs.value().cmp(&rhs.value()) {
            std::cmp::Ordering::Less => Comparison::Less,
            std::cmp::Ordering::Equal => Comparison::Equal,
            std::cmp::Ordering::Greater => Comparison::Greater,
        }
    }
}

impl Default for Comparison {
    fn default() -> Self {
        Comparison::Equal
    }
}

/// The MIX register file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Registers {
    /// A: accumulator.
    pub a: Word,

    /// X: extension register.
    pub x: Word,

    /// I1..I6: index registers (i[0] is I1).
    pub i: [Word; 6],

    /// J: jump register.
    pub j: Word,

    /// Program counter.
    pub pc: i32,

    /// Comparison indicator, EQUAL at power-on.
    pub comparison: Comparison,
}

impl Registers {
    /// Create a register file with all words zeroed, `pc = 0` and the
    /// comparison indicator EQUAL.
    pub fn new() -> Self {
        Self {
            a: Word::zero(),
            x: Word::zero(),
            i: [Word::zero(); 6],
            j: Word::zero(),
            pc: 0,
            comparison: Comparison::Equal,
        }
    }

    /// Reset all registers to the power-on state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Read a register by designator.
    pub fn get(&self, reg: Reg) -> Word {
        match reg {
            Reg::A => self.a,
            Reg::X => self.x,
            Reg::I(n) => self.i[n as usize - 1],
        }
    }

    /// Write a register by designator.
    pub fn set(&mut self, reg: Reg, value: Word) {
        match reg {
            Reg::A => self.a = value,
            Reg::X => self.x = value,
            Reg::I(n) => self.i[n as usize - 1] = value,
        }
    }

    /// Compute an effective address: the instruction's address field plus
    /// the selected index register's value (index 0 means no indexing).
    ///
    /// Index specifiers above 6 are a program error; no memory-bounds
    /// checking happens here (the result may be any integer).
    pub fn indexed_address(&self, addr: i32, index: u8) -> i32 {
        if index == 0 {
            addr
        } else {
            addr + self.i[index as usize - 1].value()
        }
    }

    /// The combined 60-bit AX value: A is the high half, X the low half,
    /// the sign is A's.
    pub fn ax_value(&self) -> i64 {
        let abs = (self.a.abs_value() as u64) << Word::N_BITS | self.x.abs_value() as u64;
        if self.a.negative() {
            -(abs as i64)
        } else {
            abs as i64
        }
    }

    /// Split a signed 60-bit value across the AX pair: X takes the low 30
    /// bits of the magnitude, A the high bits, and both take the sign.
    /// Zero always yields a positive sign on both halves.
    pub fn set_ax_value(&mut self, value: i64) {
        let negative = value < 0;
        let abs = value.unsigned_abs();
        self.x = Word::from_parts(abs as u32, negative);
        self.a = Word::from_parts((abs >> Word::N_BITS) as u32, negative);
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_on_state() {
        let regs = Registers::new();
        assert_eq!(regs.a.value(), 0);
        assert_eq!(regs.pc, 0);
        assert_eq!(regs.comparison, Comparison::Equal);
    }

    #[test]
    fn test_get_set() {
        let mut regs = Registers::new();
        regs.set(Reg::I(3), Word::from_i32(77));
        assert_eq!(regs.get(Reg::I(3)).value(), 77);
        assert_eq!(regs.i[2].value(), 77);

        regs.set(Reg::A, Word::from_i32(-5));
        regs.set(Reg::X, Word::from_i32(6));
        assert_eq!(regs.get(Reg::A).value(), -5);
        assert_eq!(regs.get(Reg::X).value(), 6);
    }

    #[test]
    fn test_indexed_address() {
        let mut regs = Registers::new();
        regs.i[5] = Word::from_i32(-1);

        assert_eq!(regs.indexed_address(500, 0), 500);
        assert_eq!(regs.indexed_address(500, 6), 499);
    }

    #[test]
    fn test_ax_roundtrip() {
        let mut regs = Registers::new();
        for v in [0i64, 100, -100, 10_000_000_000, -10_000_000_000] {
            regs.set_ax_value(v);
            assert_eq!(regs.ax_value(), v);
        }
    }

    #[test]
    fn test_ax_split() {
        let mut regs = Registers::new();
        regs.set_ax_value(-((1i64 << Word::N_BITS) + 7));
        assert_eq!(regs.a.value(), -1);
        assert_eq!(regs.x.value(), -7);
        assert!(regs.a.negative() && regs.x.negative());
    }

    #[test]
    fn test_ax_zero_is_positive() {
        let mut regs = Registers::new();
        regs.set_ax_value(0);
        assert!(!regs.a.negative());
        assert!(!regs.x.negative());
    }

    #[test]
    fn test_comparison_of() {
        assert_eq!(
            Comparison::of(Word::from_i32(-1), Word::from_i32(1)),
            Comparison::Less
        );
        assert_eq!(
            Comparison::of(Word::zero(), Word::zero().neg()),
            Comparison::Equal
        );
        assert_eq!(
            Comparison::of(Word::from_i32(2), Word::from_i32(1)),
            Comparison::Greater
        );
    }
}
