//! VM state: operand stack, call frames, program counter, run status.

use crate::error::RuntimeError;
use crate::frame::Frame;
use nib_common::{Program, Value};

/// Maximum operand stack depth.
pub const MAX_STACK_DEPTH: usize = 4096;

/// Maximum call-frame depth (recursion limit).
pub const MAX_FRAME_DEPTH: usize = 1024;

/// Where a VM is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Compiled, no instruction executed yet.
    Ready,
    /// Inside run-to-completion.
    Running,
    /// Stopped between steps; state is inspectable.
    Suspended,
    /// The program ran past the end of its top-level code.
    Completed,
    /// A step failed; the VM must be reset or discarded.
    Failed,
}

/// A nib virtual machine: one compiled program plus all of its
/// execution state.
///
/// Everything the machine knows (operand stack, call frames, program
/// counter) is plain owned data, so execution can stop after any
/// instruction and resume arbitrarily later. Nothing rides on the
/// Rust call stack.
pub struct Vm {
    pub(crate) program: Program,
    pub(crate) stack: Vec<Value>,
    pub(crate) frames: Vec<Frame>,
    pub(crate) pc: usize,
    pub(crate) status: Status,
}

impl Vm {
    /// Create a VM over a compiled program, ready to execute.
    pub fn new(program: Program) -> Self {
        Self {
            program,
            stack: Vec::new(),
            frames: vec![Frame::top()],
            pc: 0,
            status: Status::Ready,
        }
    }

    /// The compiled program this VM executes.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Operand stack, bottom to top.
    pub fn stack(&self) -> &[Value] {
        &self.stack
    }

    /// Call frames, outermost first. Never empty.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Index of the next instruction to execute.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Current run status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// True once the VM has completed or failed. From then on `step`
    /// only returns [`RuntimeError::AlreadyFinished`].
    pub fn finished(&self) -> bool {
        matches!(self.status, Status::Completed | Status::Failed)
    }

    /// Discard all execution state and start over from the first
    /// instruction, keeping the compiled program.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.frames.clear();
        self.frames.push(Frame::top());
        self.pc = 0;
        self.status = Status::Ready;
    }

    /// The frame whose variables are in scope.
    pub(crate) fn frame(&self) -> &Frame {
        self.frames.last().expect("frame stack is never empty")
    }

    pub(crate) fn frame_mut(&mut self) -> &mut Frame {
        self.frames.last_mut().expect("frame stack is never empty")
    }

    /// Push a value, checking the depth limit.
    pub(crate) fn push(&mut self, value: Value) -> Result<(), RuntimeError> {
        if self.stack.len() >= MAX_STACK_DEPTH {
            return Err(RuntimeError::StackOverflow { at: self.pc - 1 });
        }
        self.stack.push(value);
        Ok(())
    }

    pub(crate) fn pop(&mut self) -> Result<Value, RuntimeError> {
        self.stack
            .pop()
            .ok_or(RuntimeError::StackUnderflow { at: self.pc - 1 })
    }

    /// Pop a value that must be a number.
    pub(crate) fn pop_num(&mut self) -> Result<f64, RuntimeError> {
        match self.pop()? {
            Value::Num(n) => Ok(n),
            other => Err(RuntimeError::TypeMismatch {
                expected: "number",
                found: other.type_name(),
                at: self.pc - 1,
            }),
        }
    }

    /// Pop a value that must be a boolean.
    pub(crate) fn pop_bool(&mut self) -> Result<bool, RuntimeError> {
        match self.pop()? {
            Value::Bool(b) => Ok(b),
            other => Err(RuntimeError::TypeMismatch {
                expected: "boolean",
                found: other.type_name(),
                at: self.pc - 1,
            }),
        }
    }
}
