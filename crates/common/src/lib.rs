//! Opal common types and instruction encoding.
//!
//! This crate provides the foundational data structures for the Opal
//! virtual machine:
//!
//! - [`Word`] — the machine's sole value type, a signed 64-bit integer
//! - [`Opcode`] — the closed set of eleven operations
//! - [`Instruction`] — opcode plus always-allocated operand, with a
//!   fixed 16-byte encoding
//! - [`Program`] — a capacity-checked instruction sequence
//! - [`Fault`] — the exhaustive runtime fault taxonomy
//! - [`LoadError`] — program-intake boundary errors
//!
//! # Dependencies
//!
//! This crate uses `thiserror` (compile-time proc-macro, zero runtime
//! cost) and has no other dependencies.

pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;
pub mod word;

// Re-export commonly used types at the crate root.
pub use error::{Fault, LoadError};
pub use instruction::{Instruction, INSTRUCTION_SIZE};
pub use opcode::Opcode;
pub use program::{Program, PROGRAM_CAPACITY};
pub use word::Word;
