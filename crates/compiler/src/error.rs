//! Error types for the nib compiler.
//!
//! Both lexing and compilation fail with a span into the original
//! source, so an embedder can highlight the offending text. Compile
//! errors always surface before any instruction executes.

use nib_common::Span;
use thiserror::Error;

/// Errors produced while tokenizing source text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A character that cannot begin any token.
    #[error("unexpected character '{ch}' at {span}")]
    UnexpectedChar { ch: char, span: Span },
}

impl LexError {
    /// The source span the error points at.
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. } => *span,
        }
    }
}

/// Errors produced while compiling a token stream into instructions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The lexer rejected the source before compilation began.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// A numeric literal that lexed but does not parse as a number.
    #[error("invalid number '{text}' at {span}")]
    BadNumber { text: String, span: Span },

    /// An identifier that is no builtin, no function, and no variable
    /// in its scope.
    #[error("unknown word '{name}' at {span}")]
    UnknownWord { name: String, span: Span },

    /// An `else` with no open `if`.
    #[error("'else' without matching 'if' at {span}")]
    UnmatchedElse { span: Span },

    /// A `do` with no open `while`.
    #[error("'do' without matching 'while' at {span}")]
    UnmatchedDo { span: Span },

    /// A `while` closed by `end` without ever reaching `do`.
    #[error("'while' without matching 'do' at {span}")]
    MissingDo { span: Span },

    /// An `end` with no open block.
    #[error("'end' without matching block at {span}")]
    UnmatchedEnd { span: Span },

    /// Source ended with a block still open; its forward jump can
    /// never be resolved. The span points at the opening keyword.
    #[error("unclosed '{opener}' at {span}")]
    UnclosedBlock { opener: &'static str, span: Span },

    /// A `def` inside another block.
    #[error("'def' is only allowed at the top level, found at {span}")]
    NestedDef { span: Span },

    /// Two functions share a name.
    #[error("duplicate function '{name}' at {span}")]
    DuplicateFunction { name: String, span: Span },

    /// Two parameters of one function share a name.
    #[error("duplicate parameter '{name}' at {span}")]
    DuplicateParam { name: String, span: Span },

    /// A variable, function, or parameter name that would shadow a
    /// builtin or an existing function, making it unreachable.
    #[error("'{name}' is already a builtin or function name at {span}")]
    ShadowedWord { name: String, span: Span },

    /// A keyword that needed a following identifier did not get one.
    #[error("expected {expected} after '{after}' at {span}")]
    ExpectedIdent {
        expected: &'static str,
        after: &'static str,
        span: Span,
    },

    /// A `def` header without a parenthesized parameter list.
    #[error("expected parameter list for function '{name}' at {span}")]
    ExpectedParams { name: String, span: Span },

    /// A parenthesis outside a `def` header.
    #[error("unexpected '{token}' at {span}")]
    UnexpectedToken { token: String, span: Span },
}

impl CompileError {
    /// The source span the error points at.
    pub fn span(&self) -> Span {
        match self {
            CompileError::Lex(e) => e.span(),
            CompileError::BadNumber { span, .. }
            | CompileError::UnknownWord { span, .. }
            | CompileError::UnmatchedElse { span }
            | CompileError::UnmatchedDo { span }
            | CompileError::MissingDo { span }
            | CompileError::UnmatchedEnd { span }
            | CompileError::UnclosedBlock { span, .. }
            | CompileError::NestedDef { span }
            | CompileError::DuplicateFunction { span, .. }
            | CompileError::DuplicateParam { span, .. }
            | CompileError::ShadowedWord { span, .. }
            | CompileError::ExpectedIdent { span, .. }
            | CompileError::ExpectedParams { span, .. }
            | CompileError::UnexpectedToken { span, .. } => *span,
        }
    }
}
