//! Instruction decoder for the MIX machine.
//!
//! Every memory word can be executed: byte 0 is the opcode, byte 1 the
//! modifier (a packed field spec for the load/store/arithmetic family, a
//! sub-mode number for everything else), byte 2 the index specifier, and
//! bytes 3-4 together with the word's sign form the address.
//!
//! Decoding is total. Opcode and sub-mode values with no assigned meaning
//! decode to explicit `Unknown`/`Other` variants and execute as no-ops,
//! exactly as on the original machine; nothing is rejected.

use crate::sixbit::{FieldSpec, Word};
use serde::{Deserialize, Serialize};

/// Register designator for instructions that act on A, X or an index
/// register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reg {
    /// The accumulator.
    A,
    /// The extension register.
    X,
    /// An index register, numbered 1..=6.
    I(u8),
}

/// What a store instruction writes into its memory field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreSrc {
    /// A register (A, X or an index register).
    Reg(Reg),
    /// The jump register.
    J,
    /// The all-zero positive word (STZ).
    Zero,
}

/// Sub-mode of the SPECIAL opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialMode {
    /// Modifier 2: stop the machine.
    Halt,
    /// Any other modifier: no effect.
    Other(u8),
}

impl SpecialMode {
    pub fn from_modifier(modifier: u8) -> Self {
        match modifier {
            2 => SpecialMode::Halt,
            other => SpecialMode::Other(other),
        }
    }

    pub fn as_modifier(self) -> u8 {
        match self {
            SpecialMode::Halt => 2,
            SpecialMode::Other(m) => m,
        }
    }
}

/// Condition of a JMP instruction, tested against the comparison indicator.
///
/// The 0/1 pair is named by behavior, not by the historical mnemonics:
/// modifier 0 is the jump that records the return address in J (like every
/// other taken jump), modifier 1 is the one that leaves J alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpCondition {
    /// Modifier 0: always jump, saving the return address in J.
    Always,
    /// Modifier 1: always jump, without touching J.
    AlwaysNoSave,
    /// Modifier 4: jump when the indicator is LESS.
    Less,
    /// Modifier 5: jump when the indicator is EQUAL.
    Equal,
    /// Modifier 6: jump when the indicator is GREATER.
    Greater,
    /// Modifier 7: jump when the indicator is GREATER or EQUAL.
    GreaterEqual,
    /// Modifier 8: jump when the indicator is not EQUAL.
    NotEqual,
    /// Modifier 9: jump when the indicator is LESS or EQUAL.
    LessEqual,
    /// Any other modifier: never jump.
    Other(u8),
}

impl JumpCondition {
    pub fn from_modifier(modifier: u8) -> Self {
        match modifier {
            0 => JumpCondition::Always,
            1 => JumpCondition::AlwaysNoSave,
            4 => JumpCondition::Less,
            5 => JumpCondition::Equal,
            6 => JumpCondition::Greater,
            7 => JumpCondition::GreaterEqual,
            8 => JumpCondition::NotEqual,
            9 => JumpCondition::LessEqual,
            other => JumpCondition::Other(other),
        }
    }

    pub fn as_modifier(self) -> u8 {
        match self {
            JumpCondition::Always => 0,
            JumpCondition::AlwaysNoSave => 1,
            JumpCondition::Less => 4,
            JumpCondition::Equal => 5,
            JumpCondition::Greater => 6,
            JumpCondition::GreaterEqual => 7,
            JumpCondition::NotEqual => 8,
            JumpCondition::LessEqual => 9,
            JumpCondition::Other(m) => m,
        }
    }
}

/// Predicate of a jump-on-register instruction, tested against the
/// register's own signed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegCondition {
    Negative,
    Zero,
    Positive,
    NonNegative,
    NonZero,
    NonPositive,
    /// Any other modifier: never jump.
    Other(u8),
}

impl RegCondition {
    pub fn from_modifier(modifier: u8) -> Self {
        match modifier {
            0 => RegCondition::Negative,
            1 => RegCondition::Zero,
            2 => RegCondition::Positive,
            3 => RegCondition::NonNegative,
            4 => RegCondition::NonZero,
            5 => RegCondition::NonPositive,
            other => RegCondition::Other(other),
        }
    }

    pub fn as_modifier(self) -> u8 {
        match self {
            RegCondition::Negative => 0,
            RegCondition::Zero => 1,
            RegCondition::Positive => 2,
            RegCondition::NonNegative => 3,
            RegCondition::NonZero => 4,
            RegCondition::NonPositive => 5,
            RegCondition::Other(m) => m,
        }
    }
}

/// Sub-mode of an address-transfer instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferMode {
    /// Modifier 0: increment the register by the effective address.
    Inc,
    /// Modifier 1: decrement the register by the effective address.
    Dec,
    /// Modifier 2: set the register to the effective address.
    Enter,
    /// Modifier 3: set the register to the negated effective address.
    EnterNeg,
    /// Any other modifier: leave the register unchanged.
    Other(u8),
}

impl TransferMode {
    pub fn from_modifier(modifier: u8) -> Self {
        match modifier {
            0 => TransferMode::Inc,
            1 => TransferMode::Dec,
            2 => TransferMode::Enter,
            3 => TransferMode::EnterNeg,
            other => TransferMode::Other(other),
        }
    }

    pub fn as_modifier(self) -> u8 {
        match self {
            TransferMode::Inc => 0,
            TransferMode::Dec => 1,
            TransferMode::Enter => 2,
            TransferMode::EnterNeg => 3,
            TransferMode::Other(m) => m,
        }
    }
}

/// A decoded MIX instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// A := A + field of memory operand.
    Add { addr: i32, index: u8, field: FieldSpec },

    /// A := A - field of memory operand.
    Sub { addr: i32, index: u8, field: FieldSpec },

    /// (A, X) := A * field of memory operand (60-bit product).
    Mul { addr: i32, index: u8, field: FieldSpec },

    /// A := (A, X) / operand, X := remainder.
    Div { addr: i32, index: u8, field: FieldSpec },

    /// Halt or no-op, depending on the sub-mode.
    Special { mode: SpecialMode },

    /// register := field of memory operand.
    Load { reg: Reg, addr: i32, index: u8, field: FieldSpec },

    /// Overwrite the field of a memory cell with a register (or zero).
    Store { src: StoreSrc, addr: i32, index: u8, field: FieldSpec },

    /// Jump on the comparison indicator.
    Jump { cond: JumpCondition, addr: i32, index: u8 },

    /// Jump on a register's own signed value.
    JumpReg { reg: Reg, cond: RegCondition, addr: i32, index: u8 },

    /// Increment / decrement / enter the effective address into a register.
    /// `negative` is the raw instruction word's sign bit, needed for the
    /// signed-zero enter case.
    Transfer { reg: Reg, mode: TransferMode, addr: i32, index: u8, negative: bool },

    /// Set the comparison indicator from a field-masked register/memory pair.
    Compare { reg: Reg, addr: i32, index: u8, field: FieldSpec },

    /// Unassigned opcode; executes as a no-op.
    Unknown { opcode: u8 },
}

/// Opcode byte values.
struct Opcode;

impl Opcode {
    const ADD: u8 = 1;
    const SUB: u8 = 2;
    const MUL: u8 = 3;
    const DIV: u8 = 4;

    const SPECIAL: u8 = 5;

    const LDA: u8 = 8;
    const LD1: u8 = 9;
    const LD6: u8 = 14;
    const LDX: u8 = 15;

    const STA: u8 = 24;
    const ST1: u8 = 25;
    const ST6: u8 = 30;
    const STX: u8 = 31;
    const STJ: u8 = 32;
    const STZ: u8 = 33;

    const JMP: u8 = 39;
    const JA: u8 = 40;
    const J1: u8 = 41;
    const J6: u8 = 46;
    const JX: u8 = 47;

    const XFA: u8 = 48;
    const XF1: u8 = 49;
    const XF6: u8 = 54;
    const XFX: u8 = 55;

    const CMPA: u8 = 56;
    const CMP1: u8 = 57;
    const CMP6: u8 = 62;
    const CMPX: u8 = 63;
}

/// Decode a word as an instruction. Never fails: unassigned opcodes become
/// [`Instruction::Unknown`].
pub fn decode(word: Word) -> Instruction {
    let addr = word.address();
    let index = word.index_spec();
    let modifier = word.modifier();
    let field = FieldSpec::from_modifier(modifier);

    match word.opcode() {
        Opcode::ADD => Instruction::Add { addr, index, field },
        Opcode::SUB => Instruction::Sub { addr, index, field },
        Opcode::MUL => Instruction::Mul { addr, index, field },
        Opcode::DIV => Instruction::Div { addr, index, field },

        Opcode::SPECIAL => Instruction::Special {
            mode: SpecialMode::from_modifier(modifier),
        },

        Opcode::LDA => Instruction::Load { reg: Reg::A, addr, index, field },
        op @ Opcode::LD1..=Opcode::LD6 => Instruction::Load {
            reg: Reg::I(op - Opcode::LD1 + 1),
            addr,
            index,
            field,
        },
        Opcode::LDX => Instruction::Load { reg: Reg::X, addr, index, field },

        Opcode::STA => Instruction::Store {
            src: StoreSrc::Reg(Reg::A),
            addr,
            index,
            field,
        },
        op @ Opcode::ST1..=Opcode::ST6 => Instruction::Store {
            src: StoreSrc::Reg(Reg::I(op - Opcode::ST1 + 1)),
            addr,
            index,
            field,
        },
        Opcode::STX => Instruction::Store {
            src: StoreSrc::Reg(Reg::X),
            addr,
            index,
            field,
        },
        Opcode::STJ => Instruction::Store { src: StoreSrc::J, addr, index, field },
        Opcode::STZ => Instruction::Store { src: StoreSrc::Zero, addr, index, field },

        Opcode::JMP => Instruction::Jump {
            cond: JumpCondition::from_modifier(modifier),
            addr,
            index,
        },

        Opcode::JA => Instruction::JumpReg {
            reg: Reg::A,
            cond: RegCondition::from_modifier(modifier),
            addr,
            index,
        },
        op @ Opcode::J1..=Opcode::J6 => Instruction::JumpReg {
            reg: Reg::I(op - Opcode::J1 + 1),
            cond: RegCondition::from_modifier(modifier),
            addr,
            index,
        },
        Opcode::JX => Instruction::JumpReg {
            reg: Reg::X,
            cond: RegCondition::from_modifier(modifier),
            addr,
            index,
        },

        Opcode::XFA => Instruction::Transfer {
            reg: Reg::A,
            mode: TransferMode::from_modifier(modifier),
            addr,
            index,
            negative: word.negative(),
        },
        op @ Opcode::XF1..=Opcode::XF6 => Instruction::Transfer {
            reg: Reg::I(op - Opcode::XF1 + 1),
            mode: TransferMode::from_modifier(modifier),
            addr,
            index,
            negative: word.negative(),
        },
        Opcode::XFX => Instruction::Transfer {
            reg: Reg::X,
            mode: TransferMode::from_modifier(modifier),
            addr,
            index,
            negative: word.negative(),
        },

        Opcode::CMPA => Instruction::Compare { reg: Reg::A, addr, index, field },
        op @ Opcode::CMP1..=Opcode::CMP6 => Instruction::Compare {
            reg: Reg::I(op - Opcode::CMP1 + 1),
            addr,
            index,
            field,
        },
        Opcode::CMPX => Instruction::Compare { reg: Reg::X, addr, index, field },

        op => Instruction::Unknown { opcode: op },
    }
}

/// Encode an instruction back into a word.
pub fn encode(instr: &Instruction) -> Word {
    match *instr {
        Instruction::Add { addr, index, field } => {
            Word::instruction(Opcode::ADD, addr, index, field.as_modifier())
        }
        Instruction::Sub { addr, index, field } => {
            Word::instruction(Opcode::SUB, addr, index, field.as_modifier())
        }
        Instruction::Mul { addr, index, field } => {
            Word::instruction(Opcode::MUL, addr, index, field.as_modifier())
        }
        Instruction::Div { addr, index, field } => {
            Word::instruction(Opcode::DIV, addr, index, field.as_modifier())
        }
        Instruction::Special { mode } => {
            Word::instruction(Opcode::SPECIAL, 0, 0, mode.as_modifier())
        }
        Instruction::Load { reg, addr, index, field } => {
            let opcode = match reg {
                Reg::A => Opcode::LDA,
                Reg::X => Opcode::LDX,
                Reg::I(n) => Opcode::LD1 + n - 1,
            };
            Word::instruction(opcode, addr, index, field.as_modifier())
        }
        Instruction::Store { src, addr, index, field } => {
            let opcode = match src {
                StoreSrc::Reg(Reg::A) => Opcode::STA,
                StoreSrc::Reg(Reg::X) => Opcode::STX,
                StoreSrc::Reg(Reg::I(n)) => Opcode::ST1 + n - 1,
                StoreSrc::J => Opcode::STJ,
                StoreSrc::Zero => Opcode::STZ,
            };
            Word::instruction(opcode, addr, index, field.as_modifier())
        }
        Instruction::Jump { cond, addr, index } => {
            Word::instruction(Opcode::JMP, addr, index, cond.as_modifier())
        }
        Instruction::JumpReg { reg, cond, addr, index } => {
            let opcode = match reg {
                Reg::A => Opcode::JA,
                Reg::X => Opcode::JX,
                Reg::I(n) => Opcode::J1 + n - 1,
            };
            Word::instruction(opcode, addr, index, cond.as_modifier())
        }
        Instruction::Transfer { reg, mode, addr, index, negative } => {
            let opcode = match reg {
                Reg::A => Opcode::XFA,
                Reg::X => Opcode::XFX,
                Reg::I(n) => Opcode::XF1 + n - 1,
            };
            let word = Word::instruction(opcode, addr, index, mode.as_modifier());
            // A nonzero address already carries its own sign; the flag only
            // matters for a zero address (signed-zero enter), which the i32
            // could not carry.
            if addr == 0 && negative {
                word.neg()
            } else {
                word
            }
        }
        Instruction::Compare { reg, addr, index, field } => {
            let opcode = match reg {
                Reg::A => Opcode::CMPA,
                Reg::X => Opcode::CMPX,
                Reg::I(n) => Opcode::CMP1 + n - 1,
            };
            Word::instruction(opcode, addr, index, field.as_modifier())
        }
        Instruction::Unknown { opcode } => Word::instruction(opcode, 0, 0, 0),
    }
}
