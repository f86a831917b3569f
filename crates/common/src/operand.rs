//! Typed instruction operands.
//!
//! The serialized format carries operands as text; in memory every
//! operand is one of these variants, decided once at parse or
//! generation time so the executor never re-parses anything.

use std::fmt;

/// The operand of a single instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// No operand (`ADD();`, bare `PUSH();`, ...).
    None,
    /// Integer literal, frame offset, or argument count.
    Int(i64),
    /// Float literal.
    Float(f64),
    /// A symbolic branch/call target or a `LABEL` definition.
    Label(String),
    /// A string literal (`PRINT("...");`).
    Str(String),
}

impl Operand {
    /// Convenience constructor for label operands.
    pub fn label(name: impl Into<String>) -> Self {
        Operand::Label(name.into())
    }

    /// Convenience constructor for string operands.
    pub fn string(text: impl Into<String>) -> Self {
        Operand::Str(text.into())
    }

    /// Returns true when there is no operand.
    pub fn is_none(&self) -> bool {
        matches!(self, Operand::None)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::None => Ok(()),
            Operand::Int(n) => write!(f, "{n}"),
            // {:?} keeps the decimal point (2.0, not 2) so the textual
            // form stays float-typed.
            Operand::Float(x) => write!(f, "{x:?}"),
            Operand::Label(name) => write!(f, "{name}"),
            Operand::Str(text) => write!(f, "{text}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_int() {
        assert_eq!(Operand::Int(42).to_string(), "42");
        assert_eq!(Operand::Int(-7).to_string(), "-7");
    }

    #[test]
    fn display_float_keeps_decimal_point() {
        assert_eq!(Operand::Float(2.0).to_string(), "2.0");
        assert_eq!(Operand::Float(2.5).to_string(), "2.5");
    }

    #[test]
    fn display_label_and_str_are_bare() {
        assert_eq!(Operand::label("L0").to_string(), "L0");
        assert_eq!(Operand::string("hello").to_string(), "hello");
    }

    #[test]
    fn is_none() {
        assert!(Operand::None.is_none());
        assert!(!Operand::Int(0).is_none());
    }
}
