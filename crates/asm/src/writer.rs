//! Canonical text output for instruction streams.

use minic_common::{Instruction, Opcode, Operand, Program};

/// Serialize a program to its canonical text form, one instruction per
/// line. `LABEL` instructions become bare label names; everything else
/// is `OPNAME(operand);`.
pub(crate) fn write_program(program: &Program) -> String {
    let mut text = String::new();
    for instr in program.iter() {
        text.push_str(&write_instruction(instr));
        text.push('\n');
    }
    text
}

fn write_instruction(instr: &Instruction) -> String {
    if instr.opcode == Opcode::Label {
        // Just the name of the label.
        return match &instr.operand {
            Operand::Label(name) | Operand::Str(name) => name.clone(),
            other => other.to_string(),
        };
    }

    let name = instr.opcode.mnemonic();
    match &instr.operand {
        Operand::None => format!("{name}();"),
        Operand::Int(value) => format!("{name}({value});"),
        Operand::Float(value) => format!("{name}({value:?});"),
        Operand::Label(text) | Operand::Str(text) => {
            // Branch-family textual operands are quoted unless they
            // would read back as numbers.
            if instr.opcode.takes_text_operand() && !parses_as_number(text) {
                format!("{name}(\"{text}\");")
            } else {
                format!("{name}({text});")
            }
        }
    }
}

fn parses_as_number(text: &str) -> bool {
    text.parse::<i64>().is_ok() || text.parse::<f64>().is_ok()
}
