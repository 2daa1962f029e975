//! nib compiler — source text to flat instruction sequences.
//!
//! Compilation is two passes over the token stream: a lightweight scan
//! that collects function signatures and assignment targets, then a
//! single forward pass that emits instructions. Calls may therefore
//! appear before the `def` that declares them. Blocks compile to
//! absolute jumps patched when the matching `end` is reached; there is
//! no tree-shaped intermediate form.
//!
//! # Usage
//!
//! ```
//! use nib_compiler::compile;
//!
//! let program = compile("10 20 + puts").unwrap();
//! assert_eq!(program.instructions.len(), 4);
//! ```
//!
//! Bare words are resolved at compile time: each must name a builtin,
//! a function, or a variable assigned somewhere in the enclosing
//! scope. Anything else fails with [`CompileError::UnknownWord`]
//! before the program ever runs.

pub mod error;

mod disassembler;
mod lexer;
mod parser;

pub use error::{CompileError, LexError};

use nib_common::Program;

/// Compile nib source text into an executable program.
///
/// Returns the first error encountered. Fix one error at a time.
pub fn compile(source: &str) -> Result<Program, CompileError> {
    let tokens = lexer::tokenize(source)?;
    let program = parser::compile_tokens(&tokens)?;
    log::debug!(
        "compiled {} instructions, {} functions",
        program.instructions.len(),
        program.functions.len()
    );
    Ok(program)
}

/// Render a compiled program as a flat instruction listing.
///
/// One instruction per line, prefixed with its index so jump targets
/// and call operands can be followed by eye.
pub fn disassemble(program: &Program) -> String {
    disassembler::disassemble(program)
}
