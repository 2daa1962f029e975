//! nib CLI — run, trace, and inspect nib scripts.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Input or compile error
//! - 2: Runtime error

mod commands;
mod host;

use std::process;

fn main() {
    let mut args: Vec<String> = std::env::args().collect();

    let verbose = args.iter().any(|a| a == "-v" || a == "--verbose");
    args.retain(|a| a != "-v" && a != "--verbose");

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    simple_logger::SimpleLogger::new()
        .with_level(level)
        .init()
        .unwrap();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "trace" => commands::trace(&args[2..]),
        "dis" => commands::dis(&args[2..]),
        "check" => commands::check(&args[2..]),
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
    eprintln!("Usage: nib [-v] <command> <script.nib>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <script.nib>     Compile and execute a script");
    eprintln!("  trace <script.nib>   Execute one instruction at a time, narrating each step");
    eprintln!("  dis <script.nib>     Print the compiled instruction listing");
    eprintln!("  check <script.nib>   Compile without executing");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  -v, --verbose        Log compile summaries and drawing calls");
}
