//! The instruction struct shared by the code generator and the executor.

use crate::opcode::Opcode;
use crate::operand::Operand;

/// A single stack-machine instruction: an opcode plus an optional operand.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// The operation to perform.
    pub opcode: Opcode,
    /// The operand. `Operand::None` when the opcode takes none.
    pub operand: Operand,
}

impl Instruction {
    /// Create a new instruction.
    pub fn new(opcode: Opcode, operand: Operand) -> Self {
        Self { opcode, operand }
    }

    /// An instruction with no operand.
    pub fn nullary(opcode: Opcode) -> Self {
        Self::new(opcode, Operand::None)
    }

    /// An instruction with an integer operand.
    pub fn with_int(opcode: Opcode, value: i64) -> Self {
        Self::new(opcode, Operand::Int(value))
    }

    /// An instruction with a label operand.
    pub fn with_label(opcode: Opcode, name: impl Into<String>) -> Self {
        Self::new(opcode, Operand::label(name))
    }

    /// A `LABEL` definition marking a branch/call target.
    pub fn label_def(name: impl Into<String>) -> Self {
        Self::with_label(Opcode::Label, name)
    }

    /// True for `RET` and `RETV`, the two frame-teardown opcodes.
    pub fn is_return(&self) -> bool {
        matches!(self.opcode, Opcode::Ret | Opcode::Retv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        assert_eq!(
            Instruction::nullary(Opcode::Add),
            Instruction::new(Opcode::Add, Operand::None)
        );
        assert_eq!(
            Instruction::with_int(Opcode::Push, 3),
            Instruction::new(Opcode::Push, Operand::Int(3))
        );
        assert_eq!(
            Instruction::with_label(Opcode::Jump, "main"),
            Instruction::new(Opcode::Jump, Operand::label("main"))
        );
        assert_eq!(
            Instruction::label_def("L0"),
            Instruction::new(Opcode::Label, Operand::label("L0"))
        );
    }

    #[test]
    fn is_return() {
        assert!(Instruction::nullary(Opcode::Ret).is_return());
        assert!(Instruction::nullary(Opcode::Retv).is_return());
        assert!(!Instruction::nullary(Opcode::End).is_return());
    }
}
