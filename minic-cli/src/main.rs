//! Minic CLI — run, check, and format stack-machine listings.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Input/parse error
//! - 2: Link (label) error
//! - 3: Runtime error

mod commands;

use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "check" => commands::check(&args[2..]),
        "format" => commands::format(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: minic <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <input.smc> [--trace]   Execute an instruction listing");
    eprintln!("  check <input.smc>           Parse and link without executing");
    eprintln!("  format <input.smc>          Reprint a listing in canonical form");
}
