//! Compiled program representation.
//!
//! A program is one flat instruction sequence plus a function table.
//! Function bodies live inline in the sequence, guarded by a jump so
//! top-level control flow skips them; the table records where each body
//! starts and which parameters it binds.

use crate::instruction::Instruction;

/// One entry in the function table.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// The function's name, as written at its definition.
    pub name: String,
    /// Parameter names in declaration order.
    pub params: Vec<String>,
    /// Instruction index of the first instruction of the body.
    pub entry: usize,
}

impl Function {
    /// Create a function-table entry.
    pub fn new(name: impl Into<String>, params: Vec<String>, entry: usize) -> Self {
        Self {
            name: name.into(),
            params,
            entry,
        }
    }
}

/// A compiled nib program.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// The instruction stream.
    pub instructions: Vec<Instruction>,
    /// Function-table entries, in definition order. `Op::Call` operands
    /// index into this table.
    pub functions: Vec<Function>,
}

impl Program {
    /// Create a program from an instruction stream and function table.
    pub fn new(instructions: Vec<Instruction>, functions: Vec<Function>) -> Self {
        Self {
            instructions,
            functions,
        }
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Look up a function-table entry by name.
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }
}
