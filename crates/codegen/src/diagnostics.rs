//! Code-generation diagnostics.
//!
//! The generator never aborts: a bad node is reported and the walk
//! continues, so one pass surfaces as many problems as possible. Any
//! diagnostic at all means the produced program must not be trusted.

use thiserror::Error;

/// A non-fatal problem found while lowering the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// A name was referenced before any declaration assigned it a slot.
    #[error("unknown variable '{name}'")]
    UnknownVariable { name: String },

    /// A declared name is missing from the upstream symbol table.
    #[error("symbol '{name}' not found in symbol table")]
    UnknownSymbol { name: String },

    /// An indexed access or array initializer targeted a scalar.
    #[error("'{name}' is not an array")]
    NotAnArray { name: String },

    /// An array name was used where a scalar value is needed.
    #[error("array '{name}' used without an index")]
    ArrayWithoutIndex { name: String },

    /// An array initializer supplied more values than the array holds.
    #[error("array '{name}' of size {expected} has {given} initializers")]
    TooManyInitializers {
        name: String,
        expected: usize,
        given: usize,
    },

    /// The two arrays of an element-wise operation have different sizes.
    #[error("array sizes differ between '{target}' and '{src}'")]
    ArraySizeMismatch { target: String, src: String },

    /// Array-typed parameters are not supported.
    #[error("array parameter '{name}' is not supported")]
    ArrayParameter { name: String },

    /// A float literal's text does not parse.
    #[error("invalid float literal '{text}'")]
    InvalidFloatLiteral { text: String },

    /// An operator lexeme has no corresponding instruction.
    #[error("unknown operator '{text}'")]
    UnknownOperator { text: String },

    /// A tree shape the generator cannot lower.
    #[error("unexpected {kind} node")]
    UnexpectedNode { kind: String },
}
