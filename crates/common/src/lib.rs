//! Minic common types.
//!
//! This crate is the contract between the code generator and the stack
//! machine:
//!
//! - [`Opcode`] — the closed instruction set
//! - [`Operand`] — typed instruction operands
//! - [`Instruction`] — opcode + operand
//! - [`Program`] — the flat instruction stream
//! - [`Value`] — the tagged stack cell with the numeric promotion rules
//!
//! The serialized text form of a [`Program`] lives in `minic-asm`; the
//! in-memory representation here is what both sides of the pipeline
//! share directly, so nothing is re-parsed at execution time.

pub mod instruction;
pub mod opcode;
pub mod operand;
pub mod program;
pub mod value;

pub use instruction::Instruction;
pub use opcode::Opcode;
pub use operand::Operand;
pub use program::Program;
pub use value::{NumericPair, Value};
