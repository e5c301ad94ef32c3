//! The step engine: fetch, decode, execute exactly one instruction.
//!
//! Every per-opcode check runs before any mutation, so a faulting
//! instruction leaves stack and cursor exactly as they were.

use crate::machine::{Machine, Outcome, STACK_CAPACITY};
use opal_common::word::{word_from_bool, word_is_true};
use opal_common::{Fault, Opcode, Word};

impl<'a> Machine<'a> {
    /// Execute one instruction.
    ///
    /// Advances the cursor by one, or redirects it for the jump
    /// opcodes. END sets the halt flag with the cursor frozen.
    /// Stepping a halted machine is a no-op returning `Ok(())`.
    pub fn step(&mut self) -> Result<(), Fault> {
        if self.halted {
            return Ok(());
        }

        let instr = self.fetch()?;

        match instr.opcode {
            Opcode::Push => self.exec_push(instr.operand),
            Opcode::Dup => self.exec_dup(instr.operand),
            Opcode::Plus => self.exec_binary(|a, b| a.wrapping_add(b)),
            Opcode::Minus => self.exec_binary(|a, b| a.wrapping_sub(b)),
            Opcode::Multiply => self.exec_binary(|a, b| a.wrapping_mul(b)),
            Opcode::Division => self.exec_division(),
            Opcode::Equal => self.exec_binary(|a, b| word_from_bool(a == b)),
            Opcode::Jump => {
                // Target validity is checked at the next fetch.
                self.cursor = instr.operand;
                Ok(())
            }
            Opcode::JumpIfTrue => self.exec_jump_if_true(instr.operand),
            Opcode::PrintDebug => self.exec_print_debug(),
            Opcode::End => {
                self.halted = true;
                Ok(())
            }
        }
    }

    /// Step until END, a fault, or the external step bound.
    ///
    /// The bound is the caller's safety valve: the instruction set is
    /// Turing-complete, and the engine itself imposes no limit.
    pub fn run(&mut self, step_limit: usize) -> Result<Outcome, Fault> {
        for i in 0..step_limit {
            if self.halted {
                return Ok(Outcome::Halted);
            }
            if self.trace {
                let cursor = self.cursor;
                if let Ok(instr) = self.fetch() {
                    self.emit(format_args!("[{i}] {cursor}: {instr}"));
                }
            }
            self.step()?;
        }

        if self.halted {
            Ok(Outcome::Halted)
        } else {
            Ok(Outcome::BoundExceeded)
        }
    }

    fn exec_push(&mut self, value: Word) -> Result<(), Fault> {
        self.push(value)?;
        self.cursor += 1;
        Ok(())
    }

    fn exec_dup(&mut self, offset: Word) -> Result<(), Fault> {
        if offset < 0 {
            return Err(Fault::IllegalOperand {
                at: self.at(),
                operand: offset,
            });
        }
        // Strictly more depth than the offset is required.
        if self.stack.len() as Word - offset <= 0 {
            return Err(Fault::StackUnderflow { at: self.at() });
        }
        if self.stack.len() >= STACK_CAPACITY {
            return Err(Fault::StackOverflow { at: self.at() });
        }

        let value = self.stack[self.stack.len() - 1 - offset as usize];
        self.stack.push(value);
        self.cursor += 1;
        Ok(())
    }

    /// Binary operation: left operand is deeper, right operand is on
    /// top, and the result replaces both in place.
    fn exec_binary(&mut self, op: fn(Word, Word) -> Word) -> Result<(), Fault> {
        if self.stack.len() < 2 {
            return Err(Fault::StackUnderflow { at: self.at() });
        }

        let top = self.stack.len() - 1;
        self.stack[top - 1] = op(self.stack[top - 1], self.stack[top]);
        self.stack.truncate(top);
        self.cursor += 1;
        Ok(())
    }

    fn exec_division(&mut self) -> Result<(), Fault> {
        if self.stack.len() < 2 {
            return Err(Fault::StackUnderflow { at: self.at() });
        }

        let top = self.stack.len() - 1;
        if self.stack[top] == 0 {
            return Err(Fault::DivideByZero { at: self.at() });
        }

        // Truncates toward zero; wrapping_div so MIN / -1 cannot panic.
        self.stack[top - 1] = self.stack[top - 1].wrapping_div(self.stack[top]);
        self.stack.truncate(top);
        self.cursor += 1;
        Ok(())
    }

    fn exec_jump_if_true(&mut self, target: Word) -> Result<(), Fault> {
        let condition = self.pop()?;
        if word_is_true(condition) {
            self.cursor = target;
        } else {
            self.cursor += 1;
        }
        Ok(())
    }

    fn exec_print_debug(&mut self) -> Result<(), Fault> {
        let value = self.pop()?;
        self.emit(format_args!("{value}"));
        self.cursor += 1;
        Ok(())
    }
}
