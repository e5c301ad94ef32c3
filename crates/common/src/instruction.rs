//! Instruction representation and fixed-size encoding.
//!
//! Every instruction occupies a fixed 16-byte slot:
//! ```text
//! Byte 0:     opcode (u8)
//! Bytes 1-7:  reserved (zero on encode, ignored on decode)
//! Bytes 8-15: operand (i64, little-endian)
//! ```
//! The operand field is always allocated; opcodes without a declared
//! operand simply ignore it.

use crate::error::Fault;
use crate::opcode::Opcode;
use crate::word::Word;

/// Size of one encoded instruction slot in bytes.
pub const INSTRUCTION_SIZE: usize = 16;

/// A single Opal instruction: an opcode plus its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// The operation to perform.
    pub opcode: Opcode,
    /// The operand. Meaningful only when [`Opcode::has_operand`] is true.
    pub operand: Word,
}

impl Instruction {
    /// Create an instruction from opcode and operand.
    pub fn new(opcode: Opcode, operand: Word) -> Self {
        Self { opcode, operand }
    }

    /// PUSH with a literal value.
    pub fn push(value: Word) -> Self {
        Self::new(Opcode::Push, value)
    }

    /// DUP with an offset from the top of the stack.
    pub fn dup(offset: Word) -> Self {
        Self::new(Opcode::Dup, offset)
    }

    /// PLUS.
    pub fn plus() -> Self {
        Self::new(Opcode::Plus, 0)
    }

    /// MINUS.
    pub fn minus() -> Self {
        Self::new(Opcode::Minus, 0)
    }

    /// MULTIPLY.
    pub fn multiply() -> Self {
        Self::new(Opcode::Multiply, 0)
    }

    /// DIVISION.
    pub fn division() -> Self {
        Self::new(Opcode::Division, 0)
    }

    /// EQUAL.
    pub fn equal() -> Self {
        Self::new(Opcode::Equal, 0)
    }

    /// JUMP to a target address.
    pub fn jump(target: Word) -> Self {
        Self::new(Opcode::Jump, target)
    }

    /// JUMP_IF_TRUE to a target address.
    pub fn jump_if_true(target: Word) -> Self {
        Self::new(Opcode::JumpIfTrue, target)
    }

    /// PRINT_DEBUG.
    pub fn print_debug() -> Self {
        Self::new(Opcode::PrintDebug, 0)
    }

    /// END.
    pub fn end() -> Self {
        Self::new(Opcode::End, 0)
    }

    /// Encode this instruction into its 16-byte slot.
    pub fn encode(&self) -> [u8; INSTRUCTION_SIZE] {
        let mut bytes = [0u8; INSTRUCTION_SIZE];
        bytes[0] = self.opcode as u8;
        bytes[8..16].copy_from_slice(&self.operand.to_le_bytes());
        bytes
    }

    /// Decode a 16-byte slot into an instruction.
    ///
    /// Returns [`Fault::IllegalInstruction`] when byte 0 is not a
    /// member of the closed opcode set.
    pub fn decode(bytes: [u8; INSTRUCTION_SIZE]) -> Result<Self, Fault> {
        let opcode = Opcode::try_from(bytes[0])?;
        let mut operand_bytes = [0u8; 8];
        operand_bytes.copy_from_slice(&bytes[8..16]);
        let operand = Word::from_le_bytes(operand_bytes);
        Ok(Self { opcode, operand })
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.opcode.has_operand() {
            write!(f, "{} {}", self.opcode.mnemonic(), self.operand)
        } else {
            f.write_str(self.opcode.mnemonic())
        }
    }
}
