//! # MIX Emulator
//!
//! A sign-magnitude emulator of the MIX computer, the idealized machine of
//! Donald Knuth's "The Art of Computer Programming" (1968).
//!
//! The crate is a library only: there is no assembler, loader or I/O
//! device. A caller builds registers and memory directly (or encodes
//! [`cpu::Instruction`] values with [`cpu::encode`]), runs the machine with
//! [`cpu::Cpu::run`], and inspects the final state.
//!
//! ```
//! use mix::cpu::{encode, Cpu, Instruction, Reg, SpecialMode};
//! use mix::sixbit::{FieldSpec, Word};
//!
//! let mut cpu = Cpu::new();
//! cpu.mem[1000] = Word::from_i32(-123);
//! cpu.load_program(&[
//!     encode(&Instruction::Load {
//!         reg: Reg::A,
//!         addr: 1000,
//!         index: 0,
//!         field: FieldSpec::all(),
//!     }),
//!     encode(&Instruction::Special { mode: SpecialMode::Halt }),
//! ])
//! .unwrap();
//! cpu.run().unwrap();
//! assert_eq!(cpu.regs.a.value(), -123);
//! ```

pub mod cpu;
pub mod sixbit;

// Re-export commonly used types
pub use cpu::{Comparison, Cpu, CpuError, CpuState, Instruction, Memory, Registers};
pub use sixbit::{Byte, FieldSpec, Word};
