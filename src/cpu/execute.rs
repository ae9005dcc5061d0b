//! CPU execution engine for the MIX machine.
//!
//! Implements the fetch-decode-execute cycle and all instruction behaviors.
//! The loop has no built-in step limit: a program that never reaches HALT
//! runs forever, as on the original machine. Embedders that need bounded
//! execution can use [`Cpu::run_limited`].

use crate::cpu::decode::{
    decode, Instruction, JumpCondition, RegCondition, SpecialMode, StoreSrc, TransferMode,
};
use crate::cpu::memory::MemoryError;
use crate::cpu::registers::Comparison;
use crate::cpu::{Memory, Registers};
use crate::sixbit::{FieldSpec, Word};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// CPU execution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CpuState {
    /// CPU is running normally.
    Running,
    /// CPU has halted (executed HALT).
    Halted,
}

/// The MIX CPU.
#[derive(Clone, Serialize, Deserialize)]
pub struct Cpu {
    /// CPU registers.
    pub regs: Registers,
    /// Main memory.
    pub mem: Memory,
    /// Current execution state.
    pub state: CpuState,
    /// Instruction count (for profiling).
    pub cycles: u64,
    /// Last executed instruction (for debugging).
    last_instr: Option<Instruction>,
}

impl Cpu {
    /// Create a new CPU with zeroed state.
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            mem: Memory::new(),
            state: CpuState::Running,
            cycles: 0,
            last_instr: None,
        }
    }

    /// Reset the CPU to initial state.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.mem.clear();
        self.state = CpuState::Running;
        self.cycles = 0;
        self.last_instr = None;
    }

    /// Load a program into memory starting at address 0.
    pub fn load_program(&mut self, program: &[Word]) -> Result<(), MemoryError> {
        self.mem.load_program(0, program)
    }

    /// Execute a single instruction.
    ///
    /// Returns the instruction that was executed, or an error.
    pub fn step(&mut self) -> Result<Instruction, CpuError> {
        if self.state != CpuState::Running {
            return Err(CpuError::NotRunning(self.state));
        }

        // Fetch and decode (decoding is total).
        let raw = self.mem.read(self.regs.pc)?;
        let instr = decode(raw);

        // By default the next instruction is the following memory address;
        // jumps and HALT override.
        let next_pc = self.execute(instr, self.regs.pc + 1)?;
        self.regs.pc = next_pc;

        self.cycles += 1;
        self.last_instr = Some(instr);

        Ok(instr)
    }

    /// Run until HALT.
    ///
    /// Returns the number of instructions executed.
    pub fn run(&mut self) -> Result<u64, CpuError> {
        let start_cycles = self.cycles;

        while self.state == CpuState::Running {
            self.step()?;
        }

        Ok(self.cycles - start_cycles)
    }

    /// Run for at most `max_cycles` instructions.
    pub fn run_limited(&mut self, max_cycles: u64) -> Result<u64, CpuError> {
        let start_cycles = self.cycles;
        let limit = self.cycles + max_cycles;

        while self.state == CpuState::Running && self.cycles < limit {
            self.step()?;
        }

        Ok(self.cycles - start_cycles)
    }

    /// Execute a decoded instruction; returns the address of the next
    /// instruction.
    fn execute(&mut self, instr: Instruction, next_pc: i32) -> Result<i32, CpuError> {
        match instr {
            // ==================== Arithmetic ====================
            Instruction::Add { addr, index, field } => {
                let operand = self.load_operand(addr, index, field)?;
                self.regs.a = Word::from_i32(self.regs.a.value() + operand.value());
            }

            Instruction::Sub { addr, index, field } => {
                let operand = self.load_operand(addr, index, field)?;
                self.regs.a = Word::from_i32(self.regs.a.value() - operand.value());
            }

            Instruction::Mul { addr, index, field } => {
                let operand = self.load_operand(addr, index, field)?;
                let product = self.regs.a.value() as i64 * operand.value() as i64;
                self.regs.set_ax_value(product);
            }

            Instruction::Div { addr, index, field } => {
                let divisor = self.load_operand(addr, index, field)?.value();
                if divisor == 0 {
                    return Err(CpuError::DivisionByZero);
                }

                let dividend = self.regs.ax_value();
                let quotient = dividend / divisor as i64;
                let remainder = dividend % divisor as i64;

                // A quotient magnitude beyond 30 bits truncates, the same
                // masking every word write performs.
                self.regs.a = Word::from_parts(quotient.unsigned_abs() as u32, quotient < 0);
                self.regs.x = Word::from_i32(remainder as i32);
            }

            // ==================== Special ====================
            Instruction::Special { mode } => match mode {
                SpecialMode::Halt => {
                    self.state = CpuState::Halted;
                    // pc stays on the halt instruction itself.
                    return Ok(self.regs.pc);
                }
                SpecialMode::Other(_) => {}
            },

            // ==================== Data Transfer ====================
            Instruction::Load { reg, addr, index, field } => {
                let value = self.load_operand(addr, index, field)?;
                self.regs.set(reg, value);
            }

            Instruction::Store { src, addr, index, field } => {
                let value = match src {
                    StoreSrc::Reg(reg) => self.regs.get(reg),
                    StoreSrc::J => self.regs.j,
                    StoreSrc::Zero => Word::zero(),
                };
                let m = self.regs.indexed_address(addr, index);
                let mut cell = self.mem.read(m)?;
                cell.set_field(field, value);
                self.mem.write(m, cell)?;
            }

            // ==================== Control Flow ====================
            Instruction::Jump { cond, addr, index } => {
                let m = self.regs.indexed_address(addr, index);
                let taken = match cond {
                    JumpCondition::Always => true,
                    JumpCondition::AlwaysNoSave => return Ok(m),
                    JumpCondition::Less => self.regs.comparison == Comparison::Less,
                    JumpCondition::Equal => self.regs.comparison == Comparison::Equal,
                    JumpCondition::Greater => self.regs.comparison == Comparison::Greater,
                    JumpCondition::GreaterEqual => self.regs.comparison != Comparison::Less,
                    JumpCondition::NotEqual => self.regs.comparison != Comparison::Equal,
                    JumpCondition::LessEqual => self.regs.comparison != Comparison::Greater,
                    JumpCondition::Other(_) => false,
                };
                return Ok(self.jump_if(taken, m, next_pc));
            }

            Instruction::JumpReg { reg, cond, addr, index } => {
                let m = self.regs.indexed_address(addr, index);
                let value = self.regs.get(reg).value();
                let taken = match cond {
                    RegCondition::Negative => value < 0,
                    RegCondition::Zero => value == 0,
                    RegCondition::Positive => value > 0,
                    RegCondition::NonNegative => value >= 0,
                    RegCondition::NonZero => value != 0,
                    RegCondition::NonPositive => value <= 0,
                    RegCondition::Other(_) => false,
                };
                return Ok(self.jump_if(taken, m, next_pc));
            }

            // ==================== Address Transfer ====================
            Instruction::Transfer { reg, mode, addr, index, negative } => {
                let m = self.regs.indexed_address(addr, index);
                let current = self.regs.get(reg);
                let updated = match mode {
                    TransferMode::Inc => Word::from_i32(current.value() + m),
                    TransferMode::Dec => Word::from_i32(current.value() - m),
                    // Entering an effective address of exactly zero keeps
                    // the instruction word's own sign.
                    TransferMode::Enter => {
                        if m != 0 {
                            Word::from_i32(m)
                        } else {
                            Word::from_parts(0, negative)
                        }
                    }
                    TransferMode::EnterNeg => {
                        if m != 0 {
                            Word::from_i32(-m)
                        } else {
                            Word::from_parts(0, !negative)
                        }
                    }
                    TransferMode::Other(_) => current,
                };
                self.regs.set(reg, updated);
            }

            // ==================== Comparison ====================
            Instruction::Compare { reg, addr, index, field } => {
                let lhs = self.regs.get(reg).field(field);
                let rhs = self.load_operand(addr, index, field)?;
                self.regs.comparison = Comparison::of(lhs, rhs);
            }

            Instruction::Unknown { .. } => {
                // Unassigned opcode: no effect.
            }
        }

        Ok(next_pc)
    }

    /// Fetch a memory operand through its field spec.
    fn load_operand(&self, addr: i32, index: u8, field: FieldSpec) -> Result<Word, CpuError> {
        let m = self.regs.indexed_address(addr, index);
        Ok(self.mem.read(m)?.field(field))
    }

    /// Take or fall through a jump; a taken jump records the return
    /// address in J.
    fn jump_if(&mut self, taken: bool, target: i32, next_pc: i32) -> i32 {
        if taken {
            self.regs.j = Word::from_i32(next_pc);
            target
        } else {
            next_pc
        }
    }

    /// Get the last executed instruction.
    pub fn last_instruction(&self) -> Option<Instruction> {
        self.last_instr
    }

    /// Check if the CPU is halted.
    pub fn is_halted(&self) -> bool {
        self.state == CpuState::Halted
    }

    /// Check if the CPU is running.
    pub fn is_running(&self) -> bool {
        self.state == CpuState::Running
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cpu")
            .field("state", &self.state)
            .field("cycles", &self.cycles)
            .field("regs", &self.regs)
            .finish()
    }
}

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CpuError {
    #[error("CPU not running: {0:?}")]
    NotRunning(CpuState),

    #[error("memory error: {0}")]
    Memory(#[from] MemoryError),

    #[error("division by zero")]
    DivisionByZero,
}
