//! Minic instruction text format — the persistence boundary between the
//! code generator and the executor.
//!
//! In memory both sides share the structured [`Program`] directly; this
//! crate only matters when a program crosses a file. The format is one
//! instruction per line: a bare label name, or `OPNAME(operand);` with
//! the operand quoted when it is a label or string literal of the
//! PRINT/BRZ/BRT/CALL/JUMP family.
//!
//! # Usage
//!
//! ```
//! let text = "JUMP(\"main\");\nmain\nPUSH(42);\nPRINT();\nRET();\nEND();\n";
//! let program = minic_asm::parse(text).unwrap();
//! assert_eq!(minic_asm::serialize(&program), text);
//! ```
//!
//! # Roundtrip Guarantee
//!
//! `parse(serialize(program)) == program` for every program the code
//! generator can produce. The parser also accepts non-canonical input
//! (indentation, trailing comments after the `;`).

pub mod error;

mod parser;
mod writer;

pub use error::ParseError;

use minic_common::Program;
use parser::parse_line;

/// Parse instruction text into a program.
///
/// Returns the first error encountered, tagged with its line number.
pub fn parse(text: &str) -> Result<Program, ParseError> {
    let mut instructions = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(instr) = parse_line(line, idx + 1)? {
            instructions.push(instr);
        }
    }
    Ok(Program::new(instructions))
}

/// Serialize a program to canonical instruction text.
pub fn serialize(program: &Program) -> String {
    writer::write_program(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minic_common::{Instruction, Opcode, Operand};

    #[test]
    fn parse_minimal() {
        let program = parse("PUSH(42);\nPRINT();\nEND();\n").unwrap();
        assert_eq!(program.len(), 3);
        assert_eq!(program.instructions[0], Instruction::with_int(Opcode::Push, 42));
        assert_eq!(program.instructions[2], Instruction::nullary(Opcode::End));
    }

    #[test]
    fn parse_skips_blank_and_comment_lines() {
        let text = "\
; zero-init then print
PUSH(0);

  PRINT();  ; value form
END();
";
        let program = parse(text).unwrap();
        assert_eq!(program.len(), 3);
    }

    #[test]
    fn labels_parse_from_bare_lines() {
        let program = parse("JUMP(\"main\");\nmain\nEND();\n").unwrap();
        assert_eq!(program.instructions[1], Instruction::label_def("main"));
    }

    #[test]
    fn roundtrip_serialize_then_parse() {
        let original = Program::new(vec![
            Instruction::with_label(Opcode::Jump, "main"),
            Instruction::label_def("fact"),
            Instruction::with_int(Opcode::Load, 0),
            Instruction::with_int(Opcode::Push, 2),
            Instruction::nullary(Opcode::Lt),
            Instruction::with_label(Opcode::Brz, "L0"),
            Instruction::with_int(Opcode::Push, 1),
            Instruction::nullary(Opcode::Retv),
            Instruction::label_def("L0"),
            Instruction::label_def("main"),
            Instruction::new(Opcode::Push, Operand::Float(1.5)),
            Instruction::new(Opcode::Print, Operand::string("result")),
            Instruction::nullary(Opcode::Print),
            Instruction::nullary(Opcode::Ret),
            Instruction::nullary(Opcode::End),
        ]);
        let text = serialize(&original);
        let reparsed = parse(&text).unwrap();
        assert_eq!(original, reparsed);
    }

    #[test]
    fn roundtrip_parse_then_serialize_is_canonical() {
        let text = "  PUSH ( 3 ) ;\nADD () ;\nEND();\n";
        let first = parse(text).unwrap();
        let canonical = serialize(&first);
        assert_eq!(canonical, "PUSH(3);\nADD();\nEND();\n");
        assert_eq!(parse(&canonical).unwrap(), first);
    }

    #[test]
    fn float_operands_survive_the_roundtrip() {
        let program = Program::new(vec![
            Instruction::new(Opcode::Push, Operand::Float(2.0)),
            Instruction::nullary(Opcode::End),
        ]);
        let reparsed = parse(&serialize(&program)).unwrap();
        // 2.0 must come back float-tagged, not as the integer 2.
        assert_eq!(reparsed.instructions[0].operand, Operand::Float(2.0));
    }

    #[test]
    fn error_reports_the_right_line() {
        let err = parse("PUSH(1);\nFROB();\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownOpcode {
                line: 2,
                token: "FROB".to_string()
            }
        );
    }

    #[test]
    fn all_nullary_opcodes_roundtrip() {
        let nullary = [
            "POP", "DUP", "LOAD", "SAVE", "STORE", "ADD", "SUB", "MUL", "DIV", "REM", "EQ",
            "NE", "LT", "GT", "LE", "GE", "BRT", "BRZ", "JUMP", "CALL", "RET", "RETV", "PRINT",
            "READ", "READF", "INT", "FLOAT", "END",
        ];
        for name in &nullary {
            let text = format!("{name}();\n");
            let program = parse(&text).unwrap();
            assert_eq!(serialize(&program), text, "roundtrip failed for {name}");
        }
    }
}
