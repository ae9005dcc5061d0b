//! MIX memory subsystem.
//!
//! A flat array of 4000 words, all zero at power-on. Execution accesses
//! memory through the checked [`Memory::read`]/[`Memory::write`] pair,
//! which turn out-of-range effective addresses into errors; callers
//! constructing machine state directly can use plain indexing.

use crate::sixbit::Word;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The number of memory cells in the machine.
pub const MEMORY_SIZE: usize = 4000;

/// MIX memory: 4000 words.
#[derive(Clone, Serialize, Deserialize)]
pub struct Memory {
    cells: Vec<Word>,
}

impl Memory {
    /// Create a new memory with all cells zeroed.
    pub fn new() -> Self {
        Self {
            cells: vec![Word::zero(); MEMORY_SIZE],
        }
    }

    /// Read the cell at a signed effective address.
    pub fn read(&self, addr: i32) -> Result<Word, MemoryError> {
        let index = self.addr_to_index(addr)?;
        Ok(self.cells[index])
    }

    /// Write the cell at a signed effective address.
    pub fn write(&mut self, addr: i32, value: Word) -> Result<(), MemoryError> {
        let index = self.addr_to_index(addr)?;
        self.cells[index] = value;
        Ok(())
    }

    fn addr_to_index(&self, addr: i32) -> Result<usize, MemoryError> {
        if addr < 0 || addr as usize >= MEMORY_SIZE {
            return Err(MemoryError::AddressOutOfRange(addr));
        }
        Ok(addr as usize)
    }

    /// Clear all memory to zeros.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Word::zero();
        }
    }

    /// Copy a program into memory starting at the given address.
    pub fn load_program(&mut self, start_addr: usize, program: &[Word]) -> Result<(), MemoryError> {
        if start_addr + program.len() > MEMORY_SIZE {
            return Err(MemoryError::ProgramTooLarge {
                size: program.len(),
                available: MEMORY_SIZE.saturating_sub(start_addr),
            });
        }

        self.cells[start_addr..start_addr + program.len()].copy_from_slice(program);
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for Memory {
    type Output = Word;

    fn index(&self, addr: usize) -> &Word {
        &self.cells[addr]
    }
}

impl std::ops::IndexMut<usize> for Memory {
    fn index_mut(&mut self, addr: usize) -> &mut Word {
        &mut self.cells[addr]
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Only count non-zero cells
        let non_zero = self.cells.iter().filter(|cell| !cell.is_zero()).count();

        f.debug_struct("Memory")
            .field("non_zero_cells", &non_zero)
            .field("total_cells", &MEMORY_SIZE)
            .finish()
    }
}

/// Errors that can occur during memory operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// Effective address is outside valid memory range.
    #[error("memory address {0} out of range (0-3999)")]
    AddressOutOfRange(i32),

    /// Program is too large to fit in memory.
    #[error("program size {size} exceeds available space {available}")]
    ProgramTooLarge { size: usize, available: usize },
}
