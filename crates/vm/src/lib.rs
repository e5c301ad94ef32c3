//! Opal virtual machine — executes fixed instruction sequences.
//!
//! The VM is a stack-based machine with:
//! - A fixed-capacity operand stack of [`Word`](opal_common::Word)s
//! - A fixed-capacity program buffer, loaded once at construction
//! - A step engine returning a specific [`Fault`] on any violation
//!
//! # Usage
//!
//! ```
//! use opal_common::{Instruction, Program};
//! use opal_vm::{run, Outcome};
//!
//! let program = Program::new(vec![
//!     Instruction::push(2),
//!     Instruction::push(3),
//!     Instruction::plus(),
//!     Instruction::end(),
//! ])
//! .unwrap();
//!
//! let (outcome, stack) = run(&program, 100).unwrap();
//! assert_eq!(outcome, Outcome::Halted);
//! assert_eq!(stack, vec![5]);
//! ```

pub mod execute;
pub mod machine;

pub use machine::{Machine, Outcome, STACK_CAPACITY};

use opal_common::{Fault, Program, Word};

/// Execute a program with an external step bound and return how it
/// ended together with the final stack contents.
///
/// This is the convenience entry point; drivers that need tracing or
/// an injected debug sink construct a [`Machine`] directly.
///
/// # Errors
///
/// Returns the [`Fault`] from the first failing step.
pub fn run(program: &Program, step_limit: usize) -> Result<(Outcome, Vec<Word>), Fault> {
    let mut machine = Machine::new(program);
    let outcome = machine.run(step_limit)?;
    Ok((outcome, machine.stack().to_vec()))
}

#[cfg(test)]
mod proptests {
    use super::*;
    use opal_common::Instruction;
    use proptest::prelude::*;

    proptest! {
        /// PUSH a, PUSH b followed by an arithmetic opcode equals
        /// direct evaluation with the deeper value on the left.
        #[test]
        fn binary_arithmetic_matches_direct_evaluation(
            a in any::<Word>(),
            b in any::<Word>(),
            op_index in 0usize..3,
        ) {
            let (instr, op): (Instruction, fn(Word, Word) -> Word) = match op_index {
                0 => (Instruction::plus(), Word::wrapping_add),
                1 => (Instruction::minus(), Word::wrapping_sub),
                _ => (Instruction::multiply(), Word::wrapping_mul),
            };

            let program = Program::new(vec![
                Instruction::push(a),
                Instruction::push(b),
                instr,
                Instruction::end(),
            ])
            .unwrap();

            let (outcome, stack) = run(&program, 10).unwrap();
            prop_assert_eq!(outcome, Outcome::Halted);
            prop_assert_eq!(stack, vec![op(a, b)]);
        }

        /// A chain of pushes followed by PLUS-reductions equals the
        /// wrapping sum of the pushed operands.
        #[test]
        fn push_chain_plus_reduction(values in prop::collection::vec(any::<Word>(), 2..16)) {
            let mut instructions: Vec<Instruction> =
                values.iter().map(|&v| Instruction::push(v)).collect();
            for _ in 1..values.len() {
                instructions.push(Instruction::plus());
            }
            instructions.push(Instruction::end());

            let program = Program::new(instructions).unwrap();
            let (outcome, stack) = run(&program, 100).unwrap();

            let sum = values.iter().fold(0 as Word, |acc, &v| acc.wrapping_add(v));
            prop_assert_eq!(outcome, Outcome::Halted);
            prop_assert_eq!(stack, vec![sum]);
        }

        /// DIVISION never produces a wrong sign for truncation: the
        /// result always equals Rust's own truncating division.
        #[test]
        fn division_truncates_toward_zero(
            a in any::<Word>(),
            b in any::<Word>().prop_filter("non-zero divisor", |&b| b != 0),
        ) {
            let program = Program::new(vec![
                Instruction::push(a),
                Instruction::push(b),
                Instruction::division(),
                Instruction::end(),
            ])
            .unwrap();

            let (_, stack) = run(&program, 10).unwrap();
            prop_assert_eq!(stack, vec![a.wrapping_div(b)]);
        }
    }
}
