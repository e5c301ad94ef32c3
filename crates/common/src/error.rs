//! Error taxonomy for the Opal VM.
//!
//! [`Fault`] is the exhaustive set of runtime failures the step engine
//! can return. Every fault is detected before the faulting instruction
//! mutates any state, so the machine is always inspectable post-mortem.
//! Variants carry the instruction index (`at`) or the offending value.

use crate::word::Word;
use thiserror::Error;

/// A runtime fault. Fatal to the current instruction's effect, never
/// corrupting of prior state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    /// A push-family operation ran while the stack was at capacity.
    #[error("stack overflow at instruction {at}")]
    StackOverflow { at: usize },

    /// An operation required more operands than the stack holds.
    #[error("stack underflow at instruction {at}")]
    StackUnderflow { at: usize },

    /// A byte value outside the closed opcode set.
    #[error("illegal instruction: opcode {opcode:#04x}")]
    IllegalInstruction { opcode: u8 },

    /// The cursor points outside the loaded program. Reported at fetch
    /// time, typically one step after a wild jump.
    #[error("illegal instruction access at cursor {cursor}")]
    IllegalInstructionAccess { cursor: Word },

    /// DIVISION with a zero right operand.
    #[error("division by zero at instruction {at}")]
    DivideByZero { at: usize },

    /// An operand violated an opcode-specific precondition, such as a
    /// negative DUP offset.
    #[error("illegal operand {operand} at instruction {at}")]
    IllegalOperand { at: usize, operand: Word },
}

/// Errors raised at the program-intake boundary, before execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The supplied instruction sequence exceeds the program buffer.
    #[error("program length {len} exceeds capacity {capacity}")]
    ProgramTooLarge { len: usize, capacity: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_display_formats() {
        assert_eq!(
            Fault::StackOverflow { at: 3 }.to_string(),
            "stack overflow at instruction 3"
        );
        assert_eq!(
            Fault::IllegalInstruction { opcode: 0xAB }.to_string(),
            "illegal instruction: opcode 0xab"
        );
        assert_eq!(
            Fault::IllegalInstructionAccess { cursor: -1 }.to_string(),
            "illegal instruction access at cursor -1"
        );
        assert_eq!(
            Fault::IllegalOperand { at: 7, operand: -2 }.to_string(),
            "illegal operand -2 at instruction 7"
        );
    }

    #[test]
    fn load_error_display() {
        assert_eq!(
            LoadError::ProgramTooLarge {
                len: 2000,
                capacity: 1024
            }
            .to_string(),
            "program length 2000 exceeds capacity 1024"
        );
    }
}
