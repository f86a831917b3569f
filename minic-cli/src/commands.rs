//! CLI command implementations.

use std::fs;

use minic_common::Program;
use minic_vm::Machine;

/// Execute an instruction listing against stdin/stdout.
pub fn run(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: run requires an input file");
        eprintln!("Usage: minic run <input.smc> [--trace]");
        return Err(1);
    }

    let input = &args[0];
    let trace = args[1..].iter().any(|a| a == "--trace");

    let program = load_program(input)?;

    // Link up front so label problems surface before any output.
    if let Err(e) = minic_vm::check(&program) {
        eprintln!("link error: {e}");
        return Err(2);
    }

    let mut machine = Machine::new(&program);
    machine.set_trace(trace);
    match machine.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("runtime error: {e}");
            Err(3)
        }
    }
}

/// Parse and link a listing without executing it.
pub fn check(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: check requires an input file");
        eprintln!("Usage: minic check <input.smc>");
        return Err(1);
    }

    let input = &args[0];
    let program = load_program(input)?;

    match minic_vm::check(&program) {
        Ok(()) => {
            println!("OK: {input} ({} instructions)", program.len());
            Ok(())
        }
        Err(e) => {
            eprintln!("link error: {e}");
            Err(2)
        }
    }
}

/// Reprint a listing in canonical form.
pub fn format(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: format requires an input file");
        eprintln!("Usage: minic format <input.smc>");
        return Err(1);
    }

    let program = load_program(&args[0])?;
    print!("{}", minic_asm::serialize(&program));
    Ok(())
}

/// Read and parse an instruction-text file.
fn load_program(input: &str) -> Result<Program, i32> {
    let text = fs::read_to_string(input).map_err(|e| {
        eprintln!("error: cannot read '{input}': {e}");
        1
    })?;

    minic_asm::parse(&text).map_err(|e| {
        eprintln!("error: {e}");
        1
    })
}
