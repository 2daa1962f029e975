//! Tokenizer for nib source text.
//!
//! Tokens carry their exact source lexeme and a byte span into the
//! untouched input. Whitespace and `#` comments are skipped; they never
//! appear in any span. The token stream always ends with a single
//! end-of-input marker.

use nib_common::Span;

use crate::error::LexError;

/// A keyword: block delimiters and declarators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Def,
    If,
    Else,
    End,
    While,
    Do,
    Set,
}

impl Keyword {
    fn lookup(word: &str) -> Option<Keyword> {
        match word {
            "def" => Some(Keyword::Def),
            "if" => Some(Keyword::If),
            "else" => Some(Keyword::Else),
            "end" => Some(Keyword::End),
            "while" => Some(Keyword::While),
            "do" => Some(Keyword::Do),
            "set" => Some(Keyword::Set),
            _ => None,
        }
    }
}

/// What kind of token a lexeme is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A numeric literal. The text is validated by the compiler, not
    /// here, so `1.2.3` lexes as one number token and fails later.
    Number,
    /// An identifier that is not a keyword.
    Ident,
    /// One of the operator words (`+ - * / % < > <= >= == !=`).
    Operator,
    /// A keyword.
    Keyword(Keyword),
    /// `(` in a `def` header.
    LParen,
    /// `)` in a `def` header.
    RParen,
    /// End of input. Always present, always last, with an empty span
    /// at the end of the source.
    Eof,
}

/// A single token: kind, exact lexeme, and source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, source: &'a str, start: usize, end: usize) -> Self {
        Self {
            kind,
            text: &source[start..end],
            span: Span::new(start, end),
        }
    }
}

/// Tokenize a full source string.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if b.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        // Comment runs to end of line.
        if b == b'#' {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
            continue;
        }

        let start = i;
        let token = match b {
            b'(' => {
                i += 1;
                Token::new(TokenKind::LParen, source, start, i)
            }
            b')' => {
                i += 1;
                Token::new(TokenKind::RParen, source, start, i)
            }
            b'0'..=b'9' => {
                i = scan_number(bytes, i);
                Token::new(TokenKind::Number, source, start, i)
            }
            // `-` binds to a literal only when a digit follows directly;
            // otherwise it is the subtraction operator.
            b'-' if bytes.get(i + 1).is_some_and(u8::is_ascii_digit) => {
                i = scan_number(bytes, i + 1);
                Token::new(TokenKind::Number, source, start, i)
            }
            b'+' | b'-' | b'*' | b'/' | b'%' => {
                i += 1;
                Token::new(TokenKind::Operator, source, start, i)
            }
            b'<' | b'>' => {
                i += 1;
                if bytes.get(i) == Some(&b'=') {
                    i += 1;
                }
                Token::new(TokenKind::Operator, source, start, i)
            }
            b'=' | b'!' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    i += 2;
                    Token::new(TokenKind::Operator, source, start, i)
                } else {
                    return Err(unexpected_char(source, i));
                }
            }
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                let word = &source[start..i];
                let kind = match Keyword::lookup(word) {
                    Some(kw) => TokenKind::Keyword(kw),
                    None => TokenKind::Ident,
                };
                Token::new(kind, source, start, i)
            }
            _ => return Err(unexpected_char(source, i)),
        };
        tokens.push(token);
    }

    tokens.push(Token::new(TokenKind::Eof, source, i, i));
    Ok(tokens)
}

/// Consume the digits-and-dots run of a number literal starting inside
/// it. Greedy on dots so `1.2.3` stays one (invalid) literal instead of
/// silently splitting.
fn scan_number(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        i += 1;
    }
    i
}

fn unexpected_char(source: &str, at: usize) -> LexError {
    // Decode the full character so multi-byte input reports cleanly.
    let ch = source[at..].chars().next().unwrap_or('\u{fffd}');
    LexError::UnexpectedChar {
        ch,
        span: Span::new(at, at + ch.len_utf8()),
    }
}
