//! CLI command implementations.

use std::fs;

use nib_common::{Program, Value};
use nib_vm::{Error, Frame, RuntimeError, Vm};

use crate::host::ConsoleHost;

/// Compile and execute a script, streaming its output to stdout.
pub fn run(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: run requires a script file");
        eprintln!("Usage: nib run <script.nib>");
        return Err(1);
    }

    let input = &args[0];
    let source = read_source(input)?;
    let mut host = ConsoleHost;

    // The host streams print output as it happens; the transcript in
    // the result is already on stdout by the time run returns.
    match nib_vm::run_with_host(&source, &mut host) {
        Ok(_) => Ok(()),
        Err(Error::Compile(e)) => {
            eprintln!("error: {e}");
            Err(1)
        }
        Err(Error::Runtime { error, .. }) => {
            eprintln!("runtime error: {error}");
            Err(2)
        }
    }
}

/// Execute a script one instruction at a time, printing each step.
pub fn trace(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: trace requires a script file");
        eprintln!("Usage: nib trace <script.nib>");
        return Err(1);
    }

    let input = &args[0];
    let source = read_source(input)?;
    let mut vm = nib_vm::begin_stepping(&source).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;
    let mut host = ConsoleHost;

    while !vm.finished() {
        let at = vm.pc();
        match vm.step(&mut host) {
            Ok(span) => {
                println!(
                    "{at:>4}  {:<10}  [{}]  {}",
                    span.text(&source),
                    render_stack(vm.stack()),
                    frame_summary(&vm)
                );
            }
            Err(RuntimeError::AlreadyFinished) => break,
            Err(e) => {
                eprintln!("runtime error: {e}");
                return Err(2);
            }
        }
    }

    Ok(())
}

/// Compile a script and print its instruction listing.
pub fn dis(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: dis requires a script file");
        eprintln!("Usage: nib dis <script.nib>");
        return Err(1);
    }

    let input = &args[0];
    let source = read_source(input)?;
    let program = compile_source(&source)?;
    print!("{}", nib_compiler::disassemble(&program));
    Ok(())
}

/// Compile a script without executing it.
pub fn check(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: check requires a script file");
        eprintln!("Usage: nib check <script.nib>");
        return Err(1);
    }

    let input = &args[0];
    let source = read_source(input)?;
    let program = compile_source(&source)?;
    println!(
        "OK: {input} ({} instructions, {} functions)",
        program.len(),
        program.functions.len()
    );
    Ok(())
}

// --- Helpers ---

/// Read a script file into memory.
fn read_source(path: &str) -> Result<String, i32> {
    fs::read_to_string(path).map_err(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        1
    })
}

/// Compile source text, reporting errors on stderr.
fn compile_source(source: &str) -> Result<Program, i32> {
    nib_compiler::compile(source).map_err(|e| {
        eprintln!("error: {e}");
        1
    })
}

/// The operand stack as a single line, bottom to top.
fn render_stack(stack: &[Value]) -> String {
    stack
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The live frame's name and the frame depth, as `name#depth`.
fn frame_summary(vm: &Vm) -> String {
    let name = vm.frames().last().map_or("?", Frame::name);
    format!("{name}#{}", vm.frames().len())
}
