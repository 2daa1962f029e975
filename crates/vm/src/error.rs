//! Runtime and library-surface errors for the nib VM.
//!
//! Compile-time problems are caught by `nib-compiler` before a VM ever
//! exists; everything here can only happen while instructions execute.
//! Every positional variant carries the instruction index (`at`).

use nib_compiler::CompileError;
use thiserror::Error;

/// Errors raised while executing instructions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A pop on an empty operand stack, or below a builtin's arity.
    #[error("stack underflow at instruction {at}")]
    StackUnderflow { at: usize },

    /// Operand-stack or call-frame depth limit exceeded.
    #[error("stack overflow at instruction {at}")]
    StackOverflow { at: usize },

    /// Read of a variable with no binding in the current frame.
    #[error("undefined variable '{name}' at instruction {at}")]
    UndefinedVariable { name: String, at: usize },

    /// `/` or `%` with a zero divisor.
    #[error("division by zero at instruction {at}")]
    DivisionByZero { at: usize },

    /// An operand had the wrong type for the operation.
    #[error("type mismatch at instruction {at}: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
        at: usize,
    },

    /// `step` after the program completed or a prior step failed.
    #[error("execution already finished")]
    AlreadyFinished,

    /// A call instruction referenced a function index outside the table.
    #[error("unknown function index {index} at instruction {at}")]
    UnknownFunction { index: usize, at: usize },

    /// The instruction pointer ran past the end inside a call, or a
    /// return executed with no caller. The program is malformed.
    #[error("unexpected end of program at instruction {at}")]
    UnexpectedEnd { at: usize },
}

/// What the library surface returns: the program either failed to
/// compile or failed while running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The source failed to compile; nothing executed.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Execution failed after producing `output`.
    #[error("{error}")]
    Runtime {
        error: RuntimeError,
        /// Print output accumulated before the failing instruction.
        output: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats() {
        assert_eq!(
            RuntimeError::DivisionByZero { at: 5 }.to_string(),
            "division by zero at instruction 5"
        );
        assert_eq!(
            RuntimeError::UndefinedVariable {
                name: "x".to_string(),
                at: 2
            }
            .to_string(),
            "undefined variable 'x' at instruction 2"
        );
        assert_eq!(
            RuntimeError::TypeMismatch {
                expected: "number",
                found: "boolean",
                at: 7
            }
            .to_string(),
            "type mismatch at instruction 7: expected number, found boolean"
        );
        assert_eq!(
            RuntimeError::AlreadyFinished.to_string(),
            "execution already finished"
        );
    }

    #[test]
    fn runtime_error_keeps_partial_output() {
        let err = Error::Runtime {
            error: RuntimeError::StackUnderflow { at: 3 },
            output: "1\n2\n".to_string(),
        };
        assert_eq!(err.to_string(), "stack underflow at instruction 3");
        match err {
            Error::Runtime { output, .. } => assert_eq!(output, "1\n2\n"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
