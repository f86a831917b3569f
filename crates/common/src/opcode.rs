//! Opcode definitions for the Minic stack-machine instruction set.

/// Identifies the operation to perform.
///
/// The set is closed: the executor dispatches by matching on this enum,
/// and the text format maps each variant to its canonical mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Stack manipulation
    /// Push the operand (or the accumulator when there is none).
    Push,
    /// Pop the top of stack into the accumulator.
    Pop,
    /// Duplicate the top of stack.
    Dup,

    // Frame memory
    /// Push the cell at frame base + offset. The offset is the operand,
    /// or is popped from the stack when the operand is absent.
    Load,
    /// Pop an offset, write the top of stack there without popping it.
    Save,
    /// Pop an offset, pop a value, write the value there.
    Store,

    // Arithmetic
    /// Pop two cells, push their sum.
    Add,
    /// Pop two cells, push (second popped - first popped).
    Sub,
    /// Pop two cells, push their product.
    Mul,
    /// Pop two cells, push (second popped / first popped).
    Div,
    /// Pop two cells, push the integer remainder. Integer-only.
    Rem,

    // Comparison (all push int 1 or 0)
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Second popped < first popped.
    Lt,
    /// Second popped > first popped.
    Gt,
    /// Second popped <= first popped.
    Le,
    /// Second popped >= first popped.
    Ge,

    // Control flow
    /// Pop the condition; branch to the target if it is nonzero.
    Brt,
    /// Pop the condition; branch to the target if it is zero.
    Brz,
    /// Unconditional jump to the target.
    Jump,
    /// Marks a branch/call target. Executes as a no-op.
    Label,

    // Calling
    /// Call the function at the label operand. Top of stack holds the
    /// argument count pushed by the caller.
    Call,
    /// Return without a value; tears down the current frame.
    Ret,
    /// Return with the top-of-stack value; the value crosses the frame.
    Retv,

    // I/O
    /// Print the string operand, or the top-of-stack value (kept).
    Print,
    /// Read an integer from the input stream and push it.
    Read,
    /// Read a float from the input stream and push it.
    Readf,

    // Type coercion (idempotent)
    /// Convert the top of stack to an int cell.
    Int,
    /// Convert the top of stack to a float cell.
    Float,

    /// Stop execution.
    End,
}

/// All opcodes, in definition order. Useful for exhaustive testing and
/// mnemonic lookup.
pub const ALL_OPCODES: [Opcode; 30] = [
    Opcode::Push,
    Opcode::Pop,
    Opcode::Dup,
    Opcode::Load,
    Opcode::Save,
    Opcode::Store,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Mul,
    Opcode::Div,
    Opcode::Rem,
    Opcode::Eq,
    Opcode::Ne,
    Opcode::Lt,
    Opcode::Gt,
    Opcode::Le,
    Opcode::Ge,
    Opcode::Brt,
    Opcode::Brz,
    Opcode::Jump,
    Opcode::Label,
    Opcode::Call,
    Opcode::Ret,
    Opcode::Retv,
    Opcode::Print,
    Opcode::Read,
    Opcode::Readf,
    Opcode::Int,
    Opcode::Float,
    Opcode::End,
];

impl Opcode {
    /// Returns the canonical text mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Dup => "DUP",
            Opcode::Load => "LOAD",
            Opcode::Save => "SAVE",
            Opcode::Store => "STORE",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::Rem => "REM",
            Opcode::Eq => "EQ",
            Opcode::Ne => "NE",
            Opcode::Lt => "LT",
            Opcode::Gt => "GT",
            Opcode::Le => "LE",
            Opcode::Ge => "GE",
            Opcode::Brt => "BRT",
            Opcode::Brz => "BRZ",
            Opcode::Jump => "JUMP",
            Opcode::Label => "LABEL",
            Opcode::Call => "CALL",
            Opcode::Ret => "RET",
            Opcode::Retv => "RETV",
            Opcode::Print => "PRINT",
            Opcode::Read => "READ",
            Opcode::Readf => "READF",
            Opcode::Int => "INT",
            Opcode::Float => "FLOAT",
            Opcode::End => "END",
        }
    }

    /// Looks up an opcode by its canonical mnemonic.
    pub fn from_mnemonic(name: &str) -> Option<Opcode> {
        ALL_OPCODES.iter().find(|op| op.mnemonic() == name).copied()
    }

    /// True for the branch-family opcodes whose textual operands obey
    /// the label/string quoting rule of the serialized format.
    pub fn takes_text_operand(&self) -> bool {
        matches!(
            self,
            Opcode::Print | Opcode::Brz | Opcode::Brt | Opcode::Call | Opcode::Jump
        )
    }
}
