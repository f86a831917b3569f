//! Parser for instruction text lines.
//!
//! Each line is a bare label name or `OPNAME(operand);`. Everything
//! after a `;` outside quotes is ignored, as is whitespace outside
//! quotes, so indented and commented listings parse the same as
//! canonical output.

use crate::error::ParseError;
use minic_common::{Instruction, Opcode, Operand};

/// Parse one line. Returns `Ok(None)` for blank and comment-only lines.
pub(crate) fn parse_line(line: &str, line_num: usize) -> Result<Option<Instruction>, ParseError> {
    let cleaned = clean_line(line);
    if cleaned.is_empty() {
        return Ok(None);
    }

    let Some(open) = cleaned.find('(') else {
        // A line without parentheses is a label definition.
        if cleaned.contains(')') || cleaned.contains('"') {
            return Err(ParseError::MalformedLine { line: line_num });
        }
        return Ok(Some(Instruction::label_def(cleaned)));
    };

    let Some(close) = cleaned.rfind(')') else {
        return Err(ParseError::MalformedLine { line: line_num });
    };
    if close < open || close != cleaned.len() - 1 {
        return Err(ParseError::MalformedLine { line: line_num });
    }

    let name = &cleaned[..open];
    let raw_operand = &cleaned[open + 1..close];

    let opcode = Opcode::from_mnemonic(name).ok_or_else(|| ParseError::UnknownOpcode {
        line: line_num,
        token: name.to_string(),
    })?;
    if opcode == Opcode::Label {
        // Label definitions are bare lines, never OPNAME form.
        return Err(ParseError::MalformedLine { line: line_num });
    }

    let operand = parse_operand(opcode, raw_operand, line_num)?;
    check_operand_shape(opcode, &operand, line_num)?;
    Ok(Some(Instruction::new(opcode, operand)))
}

/// Strip the `;` terminator and insignificant whitespace, both only
/// outside quotes.
fn clean_line(line: &str) -> String {
    let mut cleaned = String::with_capacity(line.len());
    let mut in_quotes = false;
    for c in line.chars() {
        if c == '"' {
            in_quotes = !in_quotes;
            cleaned.push(c);
        } else if !in_quotes && c == ';' {
            break;
        } else if !in_quotes && c.is_whitespace() {
            continue;
        } else {
            cleaned.push(c);
        }
    }
    cleaned
}

fn parse_operand(opcode: Opcode, raw: &str, line_num: usize) -> Result<Operand, ParseError> {
    if raw.is_empty() {
        return Ok(Operand::None);
    }

    if raw.starts_with('"') {
        if raw.len() < 2 || !raw.ends_with('"') {
            return Err(ParseError::MalformedLine { line: line_num });
        }
        let text = raw[1..raw.len() - 1].to_string();
        // A quoted operand is a string literal for PRINT and a label
        // for the branch/call family.
        return match opcode {
            Opcode::Print => Ok(Operand::Str(text)),
            Opcode::Brt | Opcode::Brz | Opcode::Jump | Opcode::Call => Ok(Operand::Label(text)),
            _ => Err(ParseError::UnexpectedOperand {
                line: line_num,
                opcode: opcode.mnemonic(),
            }),
        };
    }

    // A numeric operand with a decimal point is a float literal.
    if raw.contains('.') {
        let value: f64 = raw.parse().map_err(|_| ParseError::InvalidNumber {
            line: line_num,
            token: raw.to_string(),
        })?;
        return Ok(Operand::Float(value));
    }

    if let Ok(value) = raw.parse::<i64>() {
        return Ok(Operand::Int(value));
    }
    // Exponent-form floats (1e20) have no decimal point.
    if raw.contains(['e', 'E']) {
        if let Ok(value) = raw.parse::<f64>() {
            return Ok(Operand::Float(value));
        }
    }
    Err(ParseError::InvalidNumber {
        line: line_num,
        token: raw.to_string(),
    })
}

/// Validate the operand form against the opcode.
fn check_operand_shape(
    opcode: Opcode,
    operand: &Operand,
    line_num: usize,
) -> Result<(), ParseError> {
    let ok = match opcode {
        Opcode::Push => matches!(operand, Operand::None | Operand::Int(_) | Operand::Float(_)),
        Opcode::Load => matches!(operand, Operand::None | Operand::Int(_)),
        Opcode::Print => matches!(operand, Operand::None | Operand::Str(_)),
        Opcode::Brt | Opcode::Brz | Opcode::Jump => {
            matches!(operand, Operand::None | Operand::Int(_) | Operand::Label(_))
        }
        Opcode::Call => matches!(operand, Operand::None | Operand::Label(_)),
        // Everything else takes no operand.
        _ => operand.is_none(),
    };
    if ok {
        Ok(())
    } else {
        Err(ParseError::UnexpectedOperand {
            line: line_num,
            opcode: opcode.mnemonic(),
        })
    }
}
