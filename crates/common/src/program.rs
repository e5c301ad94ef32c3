//! Program representation: an ordered, immutable-once-built
//! instruction sequence with a fixed capacity ceiling.

use crate::error::LoadError;
use crate::instruction::Instruction;

/// Maximum number of instructions a program may hold. A deliberate
/// design constant, not an incidental limitation.
pub const PROGRAM_CAPACITY: usize = 1024;

/// An Opal program. Built once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    /// Build a program from an instruction sequence.
    ///
    /// Rejects sequences longer than [`PROGRAM_CAPACITY`]; oversized
    /// input is a caller error and is never silently truncated.
    pub fn new(instructions: Vec<Instruction>) -> Result<Self, LoadError> {
        if instructions.len() > PROGRAM_CAPACITY {
            return Err(LoadError::ProgramTooLarge {
                len: instructions.len(),
                capacity: PROGRAM_CAPACITY,
            });
        }
        Ok(Self { instructions })
    }

    /// The instruction at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    /// The full instruction sequence.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
