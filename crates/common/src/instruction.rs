//! Instructions for the nib VM.
//!
//! A compiled program is one flat sequence of instructions. Control
//! flow is expressed with absolute jump targets into that sequence;
//! there is no nesting and no serialized form.

use std::fmt;

use crate::builtin::Builtin;
use crate::span::Span;

/// An operation with its operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Push a number literal.
    Push(f64),
    /// Read a variable from the current frame and push its value.
    Load(String),
    /// Pop a value and bind it in the current frame.
    Store(String),
    /// Execute a builtin word.
    Builtin(Builtin),
    /// Call the function at this index in the program's function table.
    Call(usize),
    /// Unconditional jump to an instruction index.
    Jump(usize),
    /// Pop a boolean; jump to the target if it is false.
    JumpIfFalse(usize),
    /// Pop the current call frame and resume at its return address.
    Return,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Push(n) => write!(f, "push {n}"),
            Op::Load(name) => write!(f, "load {name}"),
            Op::Store(name) => write!(f, "store {name}"),
            Op::Builtin(b) => write!(f, "{}", b.name()),
            Op::Call(index) => write!(f, "call {index}"),
            Op::Jump(target) => write!(f, "jump {target}"),
            Op::JumpIfFalse(target) => write!(f, "jump_false {target}"),
            Op::Return => write!(f, "ret"),
        }
    }
}

/// A single instruction: an operation plus the source span of the
/// token(s) it was compiled from. The span is what a stepping VM hands
/// back to its embedder after executing the instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// The operation to perform.
    pub op: Op,
    /// Source span of the originating token(s).
    pub span: Span,
}

impl Instruction {
    /// Create a new instruction.
    pub fn new(op: Op, span: Span) -> Self {
        Self { op, span }
    }
}
