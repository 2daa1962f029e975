//! Step and run loops, and dispatch for the non-builtin opcodes.

use crate::error::RuntimeError;
use crate::frame::Frame;
use crate::host::Host;
use crate::machine::{Status, Vm, MAX_FRAME_DEPTH};
use nib_common::{Op, Span, Value};

impl Vm {
    /// Execute exactly one instruction.
    ///
    /// Returns the source span of the instruction executed, so a caller
    /// can highlight the originating text. Once the program has
    /// completed or any step has failed, every further call fails with
    /// [`RuntimeError::AlreadyFinished`].
    pub fn step(&mut self, host: &mut dyn Host) -> Result<Span, RuntimeError> {
        if self.finished() {
            return Err(RuntimeError::AlreadyFinished);
        }

        match self.advance(host) {
            Ok(Some(span)) => {
                let done = self.pc >= self.program.instructions.len() && self.frames.len() == 1;
                self.status = if done {
                    Status::Completed
                } else {
                    Status::Suspended
                };
                Ok(span)
            }
            Ok(None) => {
                // Nothing left to execute (empty program).
                self.status = Status::Completed;
                Err(RuntimeError::AlreadyFinished)
            }
            Err(err) => {
                self.status = Status::Failed;
                Err(err)
            }
        }
    }

    /// Run until the program completes or an instruction fails.
    pub fn run(&mut self, host: &mut dyn Host) -> Result<(), RuntimeError> {
        if self.finished() {
            return Err(RuntimeError::AlreadyFinished);
        }
        self.status = Status::Running;

        loop {
            match self.advance(host) {
                Ok(Some(_)) => {}
                Ok(None) => {
                    self.status = Status::Completed;
                    return Ok(());
                }
                Err(err) => {
                    self.status = Status::Failed;
                    return Err(err);
                }
            }
        }
    }

    /// Execute the instruction at `pc`, or report that the program has
    /// ended (`Ok(None)` only at top level; inside a call it is an
    /// error because every function body ends with a return).
    fn advance(&mut self, host: &mut dyn Host) -> Result<Option<Span>, RuntimeError> {
        if self.pc >= self.program.instructions.len() {
            if self.frames.len() == 1 {
                return Ok(None);
            }
            return Err(RuntimeError::UnexpectedEnd { at: self.pc });
        }

        let instr = self.program.instructions[self.pc].clone();
        self.pc += 1;
        self.exec_op(&instr.op, host)?;
        Ok(Some(instr.span))
    }

    fn exec_op(&mut self, op: &Op, host: &mut dyn Host) -> Result<(), RuntimeError> {
        match op {
            Op::Push(n) => self.push(Value::Num(*n))?,
            Op::Load(name) => {
                let value =
                    self.frame()
                        .get(name)
                        .ok_or_else(|| RuntimeError::UndefinedVariable {
                            name: name.clone(),
                            at: self.pc - 1,
                        })?;
                self.push(value)?;
            }
            Op::Store(name) => {
                let value = self.pop()?;
                self.frame_mut().set(name, value);
            }
            Op::Builtin(builtin) => self.exec_builtin(*builtin, host)?,
            Op::Call(index) => self.exec_call(*index)?,
            Op::Jump(target) => self.pc = *target,
            Op::JumpIfFalse(target) => {
                if !self.pop_bool()? {
                    self.pc = *target;
                }
            }
            Op::Return => self.exec_return()?,
        }
        Ok(())
    }

    fn exec_call(&mut self, index: usize) -> Result<(), RuntimeError> {
        let func = self
            .program
            .functions
            .get(index)
            .cloned()
            .ok_or(RuntimeError::UnknownFunction {
                index,
                at: self.pc - 1,
            })?;

        if self.frames.len() >= MAX_FRAME_DEPTH {
            return Err(RuntimeError::StackOverflow { at: self.pc - 1 });
        }

        // Topmost value is the last argument.
        let mut args = Vec::with_capacity(func.params.len());
        for _ in 0..func.params.len() {
            args.push(self.pop()?);
        }
        args.reverse();

        let mut frame = Frame::new(func.name.clone(), self.pc);
        for (param, value) in func.params.iter().zip(args) {
            frame.set(param, value);
        }
        self.frames.push(frame);
        self.pc = func.entry;

        log::trace!("call {} (depth {})", func.name, self.frames.len());
        Ok(())
    }

    fn exec_return(&mut self) -> Result<(), RuntimeError> {
        // The top-level frame has no caller to return to.
        if self.frames.len() <= 1 {
            return Err(RuntimeError::UnexpectedEnd { at: self.pc - 1 });
        }
        let frame = self.frames.pop().expect("frame stack is never empty");
        self.pc = frame.return_pc();

        log::trace!("return from {} to {}", frame.name(), self.pc);
        Ok(())
    }
}
