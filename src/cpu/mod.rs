//! CPU emulation for the MIX computer.
//!
//! This module implements the complete MIX core:
//! - 4000 five-byte memory cells
//! - 9 registers: A, X, I1..I6, J, plus pc and the comparison indicator
//! - the full instruction set behind a fetch-decode-execute loop

pub mod decode;
pub mod execute;
pub mod memory;
pub mod registers;

pub use decode::{
    decode, encode, Instruction, JumpCondition, Reg, RegCondition, SpecialMode, StoreSrc,
    TransferMode,
};
pub use execute::{Cpu, CpuError, CpuState};
pub use memory::{Memory, MemoryError, MEMORY_SIZE};
pub use registers::{Comparison, Registers};
