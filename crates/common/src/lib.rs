//! nib common types.
//!
//! This crate provides the foundational data structures shared by the
//! nib compiler and VM:
//!
//! - [`Span`] — byte ranges into untouched source text
//! - [`Value`] — runtime values (numbers and booleans)
//! - [`Builtin`] — the builtin word table with names and arities
//! - [`Op`] / [`Instruction`] — the flat instruction set, spanned
//! - [`Program`] / [`Function`] — a compiled instruction stream plus
//!   its function table
//!
//! It has no dependencies; error types live with the crates that
//! produce them.

pub mod builtin;
pub mod instruction;
pub mod program;
pub mod span;
pub mod value;

// Re-export commonly used types at the crate root.
pub use builtin::Builtin;
pub use instruction::{Instruction, Op};
pub use program::{Function, Program};
pub use span::Span;
pub use value::Value;
