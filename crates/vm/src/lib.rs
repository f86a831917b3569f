//! Minic stack machine — executes instruction streams.
//!
//! The machine has a single program counter, a one-slot accumulator, and
//! a fixed-capacity value stack of tagged int/float cells. Function
//! frames are regions of that stack linked through saved frame-base and
//! return-address cells, per the calling convention the code generator
//! emits against.
//!
//! # Usage
//!
//! ```
//! use minic_common::{Instruction, Opcode, Program};
//!
//! let program = Program::new(vec![
//!     Instruction::with_int(Opcode::Push, 42),
//!     Instruction::nullary(Opcode::Print),
//!     Instruction::nullary(Opcode::End),
//! ]);
//!
//! let mut out = Vec::new();
//! minic_vm::run_with_io(&program, std::io::empty(), &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "42\n");
//! ```

pub mod error;
pub mod execute;
pub mod machine;

pub use error::RuntimeError;
pub use machine::{Machine, STACK_CAPACITY};

use minic_common::Program;
use std::io::{BufRead, Write};

/// Execute a program against standard input and output.
///
/// Builds the label map, then runs until END, a return from the
/// outermost frame, or a fatal [`RuntimeError`].
pub fn run(program: &Program) -> Result<(), RuntimeError> {
    let mut machine = Machine::new(program);
    machine.execute()
}

/// Link a program without executing it.
///
/// Builds the label map (rejecting duplicates) and checks that every
/// symbolic branch, jump, and call target is defined somewhere. This is
/// stricter than execution itself, which resolves labels only when a
/// branch is actually taken.
pub fn check(program: &Program) -> Result<(), RuntimeError> {
    let mut machine = Machine::with_io(program, std::io::empty(), std::io::sink());
    machine.check_labels()
}

/// Execute a program with injected I/O streams. This is the entry point
/// tests use to drive READ/READF and capture PRINT output.
pub fn run_with_io<'a>(
    program: &'a Program,
    input: impl BufRead + 'a,
    output: impl Write + 'a,
) -> Result<(), RuntimeError> {
    let mut machine = Machine::with_io(program, input, output);
    machine.execute()
}
