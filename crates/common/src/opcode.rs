//! Opcode definitions for the Opal instruction set.

use crate::error::Fault;

/// Identifies the operation an instruction performs.
///
/// The set is closed: every byte value outside the assigned range is
/// rejected at decode time, and the execute stage dispatches with an
/// exhaustive match, so adding an opcode forces every call site to
/// handle it.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Push the literal operand onto the stack.
    Push = 0x01,
    /// Push a copy of the element `operand` positions below the top.
    Dup = 0x02,
    /// Pop two, push their sum.
    Plus = 0x03,
    /// Pop two, push (deeper - top).
    Minus = 0x04,
    /// Pop two, push their product.
    Multiply = 0x05,
    /// Pop two, push (deeper / top), truncating toward zero.
    Division = 0x06,
    /// Pop two, push 1 if equal, else 0.
    Equal = 0x07,
    /// Set the cursor to the operand unconditionally.
    Jump = 0x08,
    /// Pop one value; set the cursor to the operand if it is non-zero.
    JumpIfTrue = 0x09,
    /// Pop the top value and emit it on the diagnostic channel.
    PrintDebug = 0x0A,
    /// Halt the machine. The cursor does not advance.
    End = 0x0B,
}

/// All valid opcodes, in definition order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 11] = [
    Opcode::Push,
    Opcode::Dup,
    Opcode::Plus,
    Opcode::Minus,
    Opcode::Multiply,
    Opcode::Division,
    Opcode::Equal,
    Opcode::Jump,
    Opcode::JumpIfTrue,
    Opcode::PrintDebug,
    Opcode::End,
];

impl TryFrom<u8> for Opcode {
    type Error = Fault;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(Opcode::Push),
            0x02 => Ok(Opcode::Dup),
            0x03 => Ok(Opcode::Plus),
            0x04 => Ok(Opcode::Minus),
            0x05 => Ok(Opcode::Multiply),
            0x06 => Ok(Opcode::Division),
            0x07 => Ok(Opcode::Equal),
            0x08 => Ok(Opcode::Jump),
            0x09 => Ok(Opcode::JumpIfTrue),
            0x0A => Ok(Opcode::PrintDebug),
            0x0B => Ok(Opcode::End),
            // 0x00 and 0x0C..=0xFF are outside the closed set.
            _ => Err(Fault::IllegalInstruction { opcode: value }),
        }
    }
}

impl Opcode {
    /// Returns the assembly-style mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Push => "PUSH",
            Opcode::Dup => "DUP",
            Opcode::Plus => "PLUS",
            Opcode::Minus => "MINUS",
            Opcode::Multiply => "MULTIPLY",
            Opcode::Division => "DIVISION",
            Opcode::Equal => "EQUAL",
            Opcode::Jump => "JUMP",
            Opcode::JumpIfTrue => "JUMP_IF_TRUE",
            Opcode::PrintDebug => "PRINT_DEBUG",
            Opcode::End => "END",
        }
    }

    /// Whether the operand field is semantically meaningful for this
    /// opcode. The field is always allocated either way.
    pub fn has_operand(&self) -> bool {
        matches!(
            self,
            Opcode::Push | Opcode::Dup | Opcode::Jump | Opcode::JumpIfTrue
        )
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}
