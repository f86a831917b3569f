//! Runtime errors for the Minic stack machine.
//!
//! The machine has no recoverable runtime exceptions: every variant here
//! terminates execution. Each carries the index of the faulting
//! instruction where one exists.

use thiserror::Error;

/// Errors that occur while linking or executing a program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A branch, jump, or call named a label that no LABEL defines.
    #[error("unresolved label '{name}' at instruction {at}")]
    UnresolvedLabel { at: usize, name: String },

    /// Two LABEL instructions define the same name. Detected by the
    /// link pre-pass before execution starts.
    #[error("duplicate label '{name}'")]
    DuplicateLabel { name: String },

    /// The value stack exceeded its fixed capacity.
    #[error("stack overflow at instruction {at}")]
    StackOverflow { at: usize },

    /// Pop or peek on an empty stack.
    #[error("stack underflow at instruction {at}")]
    StackUnderflow { at: usize },

    /// A LOAD/SAVE/STORE address fell outside the value store.
    #[error("address {address} out of range at instruction {at}")]
    AddressOutOfRange { at: usize, address: i64 },

    /// A numeric branch destination was negative.
    #[error("invalid jump target {target} at instruction {at}")]
    InvalidJumpTarget { at: usize, target: i64 },

    /// Integer or float division (or remainder) by zero.
    #[error("division by zero at instruction {at}")]
    DivisionByZero { at: usize },

    /// READ/READF could not parse a token from the input stream.
    #[error("cannot read numeric input '{token}' at instruction {at}")]
    ReadFailed { at: usize, token: String },

    /// The operand variant is impossible for the opcode (e.g. a string
    /// operand on LOAD). Cannot arise from the text parser; guards
    /// programs built in memory.
    #[error("malformed operand at instruction {at}")]
    MalformedOperand { at: usize },

    /// The program counter ran past the end of the instruction stream.
    #[error("unexpected end of program at instruction {at}")]
    UnexpectedEndOfProgram { at: usize },

    /// The input or output stream failed.
    #[error("I/O failure at instruction {at}: {message}")]
    Io { at: usize, message: String },
}
