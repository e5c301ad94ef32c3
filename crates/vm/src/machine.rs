//! VM state management: operand stack, program cursor, halt flag, and
//! the diagnostic sink.

use opal_common::{Fault, Instruction, Program, Word};
use std::fmt;
use std::io::{self, Write};

/// Maximum operand stack depth. A deliberate design constant; every
/// push checks against it.
pub const STACK_CAPACITY: usize = 1024;

/// How a bounded run ended, when it did not fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The machine executed END.
    Halted,
    /// The external step bound ran out before END.
    BoundExceeded,
}

/// The Opal virtual machine.
///
/// Owned by its driver; construction takes the program, and the
/// program is never reloaded. Each instance is independent, so
/// concurrent programs each get their own machine.
pub struct Machine<'a> {
    /// The program being executed.
    pub(crate) program: &'a Program,
    /// Operand stack, bounded by [`STACK_CAPACITY`].
    pub(crate) stack: Vec<Word>,
    /// Index of the next instruction to execute. Signed: a jump may
    /// leave it negative or past the end, which the next fetch reports.
    pub(crate) cursor: Word,
    /// Once true, no further instruction executes.
    pub(crate) halted: bool,
    /// When true, [`Machine::run`] logs each step to the debug sink.
    pub(crate) trace: bool,
    /// Diagnostic channel for PRINT_DEBUG and tracing. Stderr when None.
    pub(crate) debug: Option<&'a mut dyn Write>,
}

impl<'a> Machine<'a> {
    /// Create a machine for the given program, with diagnostics going
    /// to stderr.
    pub fn new(program: &'a Program) -> Self {
        Self {
            program,
            stack: Vec::new(),
            cursor: 0,
            halted: false,
            trace: false,
            debug: None,
        }
    }

    /// Redirect PRINT_DEBUG and trace output to `sink`.
    pub fn set_debug_sink(&mut self, sink: &'a mut dyn Write) {
        self.debug = Some(sink);
    }

    /// Enable or disable per-step trace output during [`Machine::run`].
    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    /// Current stack contents, bottom first.
    pub fn stack(&self) -> &[Word] {
        &self.stack
    }

    /// Index of the next instruction to execute.
    pub fn cursor(&self) -> Word {
        self.cursor
    }

    /// Whether END has executed.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// The cursor as an instruction index, for fault context. Only
    /// valid after the fetch guard has passed.
    pub(crate) fn at(&self) -> usize {
        self.cursor as usize
    }

    /// Fetch the instruction at the cursor.
    ///
    /// This is where a wild jump surfaces: the cursor is checked here,
    /// not at jump time.
    pub(crate) fn fetch(&self) -> Result<Instruction, Fault> {
        if self.cursor < 0 {
            return Err(Fault::IllegalInstructionAccess {
                cursor: self.cursor,
            });
        }
        self.program
            .get(self.cursor as usize)
            .copied()
            .ok_or(Fault::IllegalInstructionAccess {
                cursor: self.cursor,
            })
    }

    /// Push a value onto the stack, checking for overflow.
    pub(crate) fn push(&mut self, value: Word) -> Result<(), Fault> {
        if self.stack.len() >= STACK_CAPACITY {
            return Err(Fault::StackOverflow { at: self.at() });
        }
        self.stack.push(value);
        Ok(())
    }

    /// Pop a value from the stack.
    pub(crate) fn pop(&mut self) -> Result<Word, Fault> {
        let at = self.at();
        self.stack.pop().ok_or(Fault::StackUnderflow { at })
    }

    /// Write one line to the diagnostic channel. A failed diagnostic
    /// write is not a machine fault.
    pub(crate) fn emit(&mut self, args: fmt::Arguments<'_>) {
        let result = match &mut self.debug {
            Some(w) => writeln!(w, "{args}"),
            None => writeln!(io::stderr(), "{args}"),
        };
        let _ = result;
    }

    /// Dump the stack, one value per line bottom-to-top, or `empty`.
    ///
    /// This is the format the driver uses for post-fault reporting.
    pub fn dump_stack(&self, w: &mut dyn Write) -> io::Result<()> {
        if self.stack.is_empty() {
            return writeln!(w, "empty");
        }
        for value in &self.stack {
            writeln!(w, "{value}")?;
        }
        Ok(())
    }

    /// Dump the loaded program, one `index: MNEMONIC [operand]` line
    /// per instruction.
    pub fn dump_program(&self, w: &mut dyn Write) -> io::Result<()> {
        for (index, instr) in self.program.instructions().iter().enumerate() {
            writeln!(w, "{index}: {instr}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(instructions: Vec<Instruction>) -> Program {
        Program::new(instructions).unwrap()
    }

    #[test]
    fn new_machine_is_empty_and_running() {
        let prog = program(vec![Instruction::end()]);
        let machine = Machine::new(&prog);
        assert_eq!(machine.stack(), &[] as &[Word]);
        assert_eq!(machine.cursor(), 0);
        assert!(!machine.is_halted());
    }

    #[test]
    fn fetch_guard_rejects_empty_program() {
        let prog = program(vec![]);
        let machine = Machine::new(&prog);
        assert_eq!(
            machine.fetch(),
            Err(Fault::IllegalInstructionAccess { cursor: 0 })
        );
    }

    #[test]
    fn fetch_guard_rejects_cursor_past_end() {
        let prog = program(vec![Instruction::end()]);
        let mut machine = Machine::new(&prog);
        machine.cursor = 1;
        assert_eq!(
            machine.fetch(),
            Err(Fault::IllegalInstructionAccess { cursor: 1 })
        );
    }

    #[test]
    fn fetch_guard_rejects_negative_cursor() {
        let prog = program(vec![Instruction::end()]);
        let mut machine = Machine::new(&prog);
        machine.cursor = -5;
        assert_eq!(
            machine.fetch(),
            Err(Fault::IllegalInstructionAccess { cursor: -5 })
        );
    }

    #[test]
    fn dump_stack_empty() {
        let prog = program(vec![Instruction::end()]);
        let machine = Machine::new(&prog);
        let mut out = Vec::new();
        machine.dump_stack(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "empty\n");
    }

    #[test]
    fn dump_stack_bottom_to_top() {
        let prog = program(vec![Instruction::end()]);
        let mut machine = Machine::new(&prog);
        machine.stack = vec![3, -7, 42];
        let mut out = Vec::new();
        machine.dump_stack(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "3\n-7\n42\n");
    }

    #[test]
    fn dump_program_listing() {
        let prog = program(vec![
            Instruction::push(5),
            Instruction::plus(),
            Instruction::end(),
        ]);
        let machine = Machine::new(&prog);
        let mut out = Vec::new();
        machine.dump_program(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0: PUSH 5\n1: PLUS\n2: END\n"
        );
    }
}
