//! Compiler from nib tokens to a flat instruction stream.
//!
//! Two passes over the token stream. The scan pass collects function
//! signatures (so calls may reference functions defined later) and the
//! `set` targets of every scope (so unknown words are rejected before
//! execution). The main pass then emits instructions left to right,
//! keeping a stack of open blocks; each block opener emits a forward
//! jump with a placeholder target that is patched when the matching
//! delimiter closes.

use nib_common::{Builtin, Function, Instruction, Op, Program, Span};

use crate::error::CompileError;
use crate::lexer::{Keyword, Token, TokenKind};

/// Placeholder jump target, patched before compilation finishes.
const UNPATCHED: usize = usize::MAX;

/// One function signature gathered by the scan pass.
struct FuncSig {
    name: String,
    name_span: Span,
    params: Vec<String>,
    /// `set` targets seen anywhere in the body.
    sets: Vec<String>,
}

/// Scan-pass output: function signatures plus top-level `set` targets.
struct Scan {
    funcs: Vec<FuncSig>,
    top_sets: Vec<String>,
}

/// Collect function signatures and per-scope `set` targets.
///
/// The scan is deliberately lenient: malformed constructs are left for
/// the main pass to reject at the same position with a precise error.
fn scan(tokens: &[Token<'_>]) -> Scan {
    let mut funcs: Vec<FuncSig> = Vec::new();
    let mut top_sets: Vec<String> = Vec::new();
    // Open-block depth inside the current def body; None at top level.
    let mut def_depth: Option<usize> = None;

    let mut pos = 0;
    while pos < tokens.len() {
        let token = tokens[pos];
        pos += 1;

        match token.kind {
            TokenKind::Keyword(Keyword::Def) => {
                match def_depth {
                    // Nested def is rejected by the main pass.
                    Some(depth) => def_depth = Some(depth + 1),
                    None => {
                        def_depth = Some(1);
                        let mut sig = FuncSig {
                            name: String::new(),
                            name_span: token.span,
                            params: Vec::new(),
                            sets: Vec::new(),
                        };
                        if let Some(name) = tokens.get(pos).filter(|t| t.kind == TokenKind::Ident) {
                            sig.name = name.text.to_string();
                            sig.name_span = name.span;
                            pos += 1;
                            if tokens.get(pos).is_some_and(|t| t.kind == TokenKind::LParen) {
                                pos += 1;
                                while let Some(param) =
                                    tokens.get(pos).filter(|t| t.kind == TokenKind::Ident)
                                {
                                    sig.params.push(param.text.to_string());
                                    pos += 1;
                                }
                                if tokens.get(pos).is_some_and(|t| t.kind == TokenKind::RParen) {
                                    pos += 1;
                                }
                            }
                        }
                        funcs.push(sig);
                    }
                }
            }
            TokenKind::Keyword(Keyword::If) | TokenKind::Keyword(Keyword::While) => {
                if let Some(depth) = def_depth {
                    def_depth = Some(depth + 1);
                }
            }
            TokenKind::Keyword(Keyword::End) => {
                if let Some(depth) = def_depth {
                    def_depth = if depth <= 1 { None } else { Some(depth - 1) };
                }
            }
            TokenKind::Keyword(Keyword::Set) => {
                if let Some(name) = tokens.get(pos).filter(|t| t.kind == TokenKind::Ident) {
                    let sets = match (def_depth, funcs.last_mut()) {
                        (Some(_), Some(sig)) => &mut sig.sets,
                        _ => &mut top_sets,
                    };
                    if !sets.iter().any(|s| s == name.text) {
                        sets.push(name.text.to_string());
                    }
                    pos += 1;
                }
            }
            _ => {}
        }
    }

    Scan { funcs, top_sets }
}

/// An open block awaiting its closing delimiter.
enum Block {
    If {
        /// Instruction index of the conditional jump past the branch.
        jump_false: usize,
        /// Jump over the else branch, once `else` has been seen.
        else_jump: Option<usize>,
        span: Span,
    },
    While {
        /// Instruction index the closing jump loops back to.
        cond_start: usize,
        /// Conditional exit jump, once `do` has been seen.
        exit_jump: Option<usize>,
        span: Span,
    },
    Def {
        /// Unconditional jump that routes top-level flow past the body.
        jump_over: usize,
        span: Span,
    },
}

impl Block {
    fn opener(&self) -> &'static str {
        match self {
            Block::If { .. } => "if",
            Block::While { .. } => "while",
            Block::Def { .. } => "def",
        }
    }

    fn span(&self) -> Span {
        match self {
            Block::If { span, .. } | Block::While { span, .. } | Block::Def { span, .. } => *span,
        }
    }
}

struct Compiler<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    scan: Scan,
    code: Vec<Instruction>,
    functions: Vec<Function>,
    blocks: Vec<Block>,
    /// Index into the function table while compiling a body; None at
    /// top level.
    scope: Option<usize>,
}

/// Compile a token stream into a program.
pub(crate) fn compile_tokens(tokens: &[Token<'_>]) -> Result<Program, CompileError> {
    let scan = scan(tokens);

    // Duplicate definitions are caught before anything is emitted; the
    // span points at the second occurrence. Unnamed signatures are
    // malformed headers; the main pass reports those at the header.
    for (i, sig) in scan.funcs.iter().enumerate() {
        if sig.name.is_empty() {
            continue;
        }
        if scan.funcs[..i].iter().any(|f| f.name == sig.name) {
            return Err(CompileError::DuplicateFunction {
                name: sig.name.clone(),
                span: sig.name_span,
            });
        }
    }

    Compiler {
        tokens,
        pos: 0,
        scan,
        code: Vec::new(),
        functions: Vec::new(),
        blocks: Vec::new(),
        scope: None,
    }
    .compile()
}

impl Compiler<'_, '_> {
    fn compile(mut self) -> Result<Program, CompileError> {
        while self.pos < self.tokens.len() {
            let token = self.tokens[self.pos];
            self.pos += 1;

            match token.kind {
                TokenKind::Number => self.number(token)?,
                TokenKind::Ident | TokenKind::Operator => {
                    let op = self.resolve_word(token.text, token.span)?;
                    self.emit(op, token.span);
                }
                TokenKind::Keyword(Keyword::Set) => self.kw_set(token)?,
                TokenKind::Keyword(Keyword::If) => {
                    let jump_false = self.emit(Op::JumpIfFalse(UNPATCHED), token.span);
                    self.blocks.push(Block::If {
                        jump_false,
                        else_jump: None,
                        span: token.span,
                    });
                }
                TokenKind::Keyword(Keyword::Else) => self.kw_else(token)?,
                TokenKind::Keyword(Keyword::While) => {
                    self.blocks.push(Block::While {
                        cond_start: self.code.len(),
                        exit_jump: None,
                        span: token.span,
                    });
                }
                TokenKind::Keyword(Keyword::Do) => self.kw_do(token)?,
                TokenKind::Keyword(Keyword::End) => self.kw_end(token)?,
                TokenKind::Keyword(Keyword::Def) => self.kw_def(token)?,
                TokenKind::LParen | TokenKind::RParen => {
                    return Err(CompileError::UnexpectedToken {
                        token: token.text.to_string(),
                        span: token.span,
                    });
                }
                TokenKind::Eof => break,
            }
        }

        if let Some(block) = self.blocks.last() {
            return Err(CompileError::UnclosedBlock {
                opener: block.opener(),
                span: block.span(),
            });
        }

        Ok(Program::new(self.code, self.functions))
    }

    /// Append an instruction, returning its index.
    fn emit(&mut self, op: Op, span: Span) -> usize {
        self.code.push(Instruction::new(op, span));
        self.code.len() - 1
    }

    /// Rewrite the placeholder target of the jump at `at`.
    fn patch(&mut self, at: usize, target: usize) {
        match &mut self.code[at].op {
            Op::Jump(t) | Op::JumpIfFalse(t) => *t = target,
            _ => unreachable!("patch target is not a jump"),
        }
    }

    fn number(&mut self, token: Token<'_>) -> Result<(), CompileError> {
        let value: f64 = token.text.parse().map_err(|_| CompileError::BadNumber {
            text: token.text.to_string(),
            span: token.span,
        })?;
        self.emit(Op::Push(value), token.span);
        Ok(())
    }

    /// Resolve a bare word: builtin, then function, then variable.
    fn resolve_word(&self, name: &str, span: Span) -> Result<Op, CompileError> {
        if let Some(builtin) = Builtin::lookup(name) {
            return Ok(Op::Builtin(builtin));
        }
        if let Some(index) = self.scan.funcs.iter().position(|f| f.name == name) {
            return Ok(Op::Call(index));
        }

        let known = match self.scope {
            Some(fidx) => {
                let sig = &self.scan.funcs[fidx];
                sig.params.iter().any(|p| p == name) || sig.sets.iter().any(|s| s == name)
            }
            None => self.scan.top_sets.iter().any(|s| s == name),
        };
        if known {
            Ok(Op::Load(name.to_string()))
        } else {
            Err(CompileError::UnknownWord {
                name: name.to_string(),
                span,
            })
        }
    }

    /// Compile `value set name` into a store on the current frame.
    fn kw_set(&mut self, set_token: Token<'_>) -> Result<(), CompileError> {
        let (name, name_span) = self.expect_ident("a variable name", "set")?;
        self.reject_shadowing(&name, name_span)?;
        self.emit(Op::Store(name), set_token.span.merge(name_span));
        Ok(())
    }

    fn kw_else(&mut self, token: Token<'_>) -> Result<(), CompileError> {
        let jump_false = match self.blocks.last() {
            Some(Block::If {
                jump_false,
                else_jump: None,
                ..
            }) => *jump_false,
            _ => return Err(CompileError::UnmatchedElse { span: token.span }),
        };

        // Jump over the else branch; its target is known only at `end`.
        let jump = self.emit(Op::Jump(UNPATCHED), token.span);
        let after = self.code.len();
        self.patch(jump_false, after);
        if let Some(Block::If { else_jump, .. }) = self.blocks.last_mut() {
            *else_jump = Some(jump);
        }
        Ok(())
    }

    fn kw_do(&mut self, token: Token<'_>) -> Result<(), CompileError> {
        match self.blocks.last() {
            Some(Block::While {
                exit_jump: None, ..
            }) => {}
            _ => return Err(CompileError::UnmatchedDo { span: token.span }),
        }

        let jump = self.emit(Op::JumpIfFalse(UNPATCHED), token.span);
        if let Some(Block::While { exit_jump, .. }) = self.blocks.last_mut() {
            *exit_jump = Some(jump);
        }
        Ok(())
    }

    fn kw_end(&mut self, token: Token<'_>) -> Result<(), CompileError> {
        match self.blocks.pop() {
            Some(Block::If {
                jump_false,
                else_jump,
                ..
            }) => {
                let after = self.code.len();
                match else_jump {
                    // `jump_false` was already patched at `else`.
                    Some(jump) => self.patch(jump, after),
                    None => self.patch(jump_false, after),
                }
                Ok(())
            }
            Some(Block::While {
                cond_start,
                exit_jump,
                span,
            }) => {
                let exit_jump = exit_jump.ok_or(CompileError::MissingDo { span })?;
                self.emit(Op::Jump(cond_start), token.span);
                let after = self.code.len();
                self.patch(exit_jump, after);
                Ok(())
            }
            Some(Block::Def { jump_over, .. }) => {
                self.emit(Op::Return, token.span);
                let after = self.code.len();
                self.patch(jump_over, after);
                self.scope = None;
                Ok(())
            }
            None => Err(CompileError::UnmatchedEnd { span: token.span }),
        }
    }

    /// Compile the head of `def name ( params ) body end`: emit the
    /// guard jump, register the function-table entry, and switch scope
    /// into the body.
    fn kw_def(&mut self, def_token: Token<'_>) -> Result<(), CompileError> {
        if !self.blocks.is_empty() {
            return Err(CompileError::NestedDef {
                span: def_token.span,
            });
        }

        let (name, name_span) = self.expect_ident("a function name", "def")?;
        if Builtin::lookup(&name).is_some() {
            return Err(CompileError::ShadowedWord {
                name,
                span: name_span,
            });
        }

        let params = self.def_params(&name, name_span)?;

        let jump_over = self.emit(Op::Jump(UNPATCHED), def_token.span);
        let entry = self.code.len();
        let index = self.functions.len();
        self.functions.push(Function::new(name, params, entry));
        self.blocks.push(Block::Def {
            jump_over,
            span: def_token.span,
        });
        self.scope = Some(index);
        Ok(())
    }

    /// Parse the parenthesized parameter list of a `def` header.
    fn def_params(&mut self, name: &str, name_span: Span) -> Result<Vec<String>, CompileError> {
        match self.tokens.get(self.pos) {
            Some(t) if t.kind == TokenKind::LParen => self.pos += 1,
            _ => {
                return Err(CompileError::ExpectedParams {
                    name: name.to_string(),
                    span: name_span,
                });
            }
        }

        let mut params = Vec::new();
        loop {
            let token = match self.tokens.get(self.pos) {
                Some(t) => *t,
                None => {
                    return Err(CompileError::ExpectedParams {
                        name: name.to_string(),
                        span: name_span,
                    });
                }
            };
            self.pos += 1;
            match token.kind {
                TokenKind::RParen => return Ok(params),
                TokenKind::Ident => {
                    self.reject_shadowing(token.text, token.span)?;
                    if params.iter().any(|p| p == token.text) {
                        return Err(CompileError::DuplicateParam {
                            name: token.text.to_string(),
                            span: token.span,
                        });
                    }
                    params.push(token.text.to_string());
                }
                _ => {
                    return Err(CompileError::ExpectedParams {
                        name: name.to_string(),
                        span: name_span,
                    });
                }
            }
        }
    }

    /// Consume the next token, requiring a plain identifier.
    fn expect_ident(
        &mut self,
        expected: &'static str,
        after: &'static str,
    ) -> Result<(String, Span), CompileError> {
        match self.tokens.get(self.pos) {
            Some(t) if t.kind == TokenKind::Ident => {
                let out = (t.text.to_string(), t.span);
                self.pos += 1;
                Ok(out)
            }
            Some(t) => Err(CompileError::ExpectedIdent {
                expected,
                after,
                span: t.span,
            }),
            None => Err(CompileError::ExpectedIdent {
                expected,
                after,
                span: Span::new(0, 0),
            }),
        }
    }

    /// Variables and parameters may not reuse builtin or function
    /// names; resolution order would make them unreachable.
    fn reject_shadowing(&self, name: &str, span: Span) -> Result<(), CompileError> {
        if Builtin::lookup(name).is_some() || self.scan.funcs.iter().any(|f| f.name == name) {
            return Err(CompileError::ShadowedWord {
                name: name.to_string(),
                span,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile;

    fn ops(source: &str) -> Vec<Op> {
        compile(source)
            .unwrap()
            .instructions
            .into_iter()
            .map(|i| i.op)
            .collect()
    }

    #[test]
    fn empty_source_compiles_to_empty_program() {
        let program = compile("").unwrap();
        assert!(program.is_empty());
        assert!(program.functions.is_empty());
    }

    #[test]
    fn straight_line_sequence() {
        assert_eq!(
            ops("10 20 + puts"),
            vec![
                Op::Push(10.0),
                Op::Push(20.0),
                Op::Builtin(Builtin::Add),
                Op::Builtin(Builtin::Puts),
            ]
        );
    }

    #[test]
    fn straight_line_spans_are_token_spans() {
        let program = compile("10 20 + puts").unwrap();
        let spans: Vec<Span> = program.instructions.iter().map(|i| i.span).collect();
        assert_eq!(
            spans,
            vec![
                Span::new(0, 2),
                Span::new(3, 5),
                Span::new(6, 7),
                Span::new(8, 12),
            ]
        );
    }

    #[test]
    fn set_then_load() {
        assert_eq!(
            ops("5 set x x puts"),
            vec![
                Op::Push(5.0),
                Op::Store("x".into()),
                Op::Load("x".into()),
                Op::Builtin(Builtin::Puts),
            ]
        );
    }

    #[test]
    fn store_span_covers_set_and_name() {
        let program = compile("5 set x").unwrap();
        assert_eq!(program.instructions[1].span, Span::new(2, 7));
    }

    #[test]
    fn if_without_else_patches_past_branch() {
        let program = compile("1 2 < if 3 puts end").unwrap();
        let ops: Vec<&Op> = program.instructions.iter().map(|i| &i.op).collect();
        assert_eq!(ops.len(), 6);
        assert_eq!(*ops[3], Op::JumpIfFalse(6));
    }

    #[test]
    fn if_else_patches_both_arms() {
        let program = compile("1 2 < if 3 else 4 end puts").unwrap();
        let ops: Vec<&Op> = program.instructions.iter().map(|i| &i.op).collect();
        // 0:push1 1:push2 2:< 3:jump_false→6 4:push3 5:jump→7 6:push4 7:puts
        assert_eq!(*ops[3], Op::JumpIfFalse(6));
        assert_eq!(*ops[5], Op::Jump(7));
        assert_eq!(*ops[6], Op::Push(4.0));
        assert_eq!(*ops[7], Op::Builtin(Builtin::Puts));
    }

    #[test]
    fn while_loop_jumps_back_to_condition() {
        let program = compile("3 set n while n 0 > do n 1 - set n end").unwrap();
        let ops: Vec<&Op> = program.instructions.iter().map(|i| &i.op).collect();
        // 0:push3 1:store n | 2:load n 3:push0 4:> 5:jump_false→11
        // 6:load n 7:push1 8:- 9:store n 10:jump→2
        assert_eq!(ops.len(), 11);
        assert_eq!(*ops[5], Op::JumpIfFalse(11));
        assert_eq!(*ops[10], Op::Jump(2));
    }

    #[test]
    fn def_emits_guard_entry_and_implicit_return() {
        let program = compile("def double ( x ) x 2 * end 5 double puts").unwrap();
        let ops: Vec<&Op> = program.instructions.iter().map(|i| &i.op).collect();
        // 0:jump→5 | 1:load x 2:push2 3:* 4:ret | 5:push5 6:call0 7:puts
        assert_eq!(*ops[0], Op::Jump(5));
        assert_eq!(*ops[4], Op::Return);
        assert_eq!(*ops[6], Op::Call(0));

        let func = program.function("double").unwrap();
        assert_eq!(func.entry, 1);
        assert_eq!(func.params, vec!["x".to_string()]);
    }

    #[test]
    fn params_keep_declaration_order() {
        let program = compile("def area ( w h ) w h * end").unwrap();
        assert_eq!(
            program.function("area").unwrap().params,
            vec!["w".to_string(), "h".to_string()]
        );
    }

    #[test]
    fn forward_calls_resolve() {
        let program = compile("5 f puts def f ( x ) x 1 + end").unwrap();
        assert_eq!(program.instructions[1].op, Op::Call(0));
        assert_eq!(program.function("f").unwrap().entry, 4);
    }

    #[test]
    fn recursive_call_targets_own_table_entry() {
        let program =
            compile("def fact ( n ) n 1 <= if 1 else n 1 - fact n * end end 5 fact puts").unwrap();
        let recursive_calls = program
            .instructions
            .iter()
            .filter(|i| i.op == Op::Call(0))
            .count();
        // One call inside the body, one at top level.
        assert_eq!(recursive_calls, 2);
    }

    #[test]
    fn conditionally_set_variable_is_statically_known() {
        // Compiles even though the read may be unbound at runtime.
        assert!(compile("1 2 < if 5 set x end x puts").is_ok());
    }

    #[test]
    fn unknown_word_is_rejected() {
        let err = compile("10 frob").unwrap_err();
        assert_eq!(
            err,
            CompileError::UnknownWord {
                name: "frob".to_string(),
                span: Span::new(3, 7),
            }
        );
    }

    #[test]
    fn never_set_variable_is_unknown() {
        assert!(matches!(
            compile("x puts").unwrap_err(),
            CompileError::UnknownWord { .. }
        ));
    }

    #[test]
    fn function_locals_are_not_visible_at_top_level() {
        let err = compile("def f ( ) 1 set local end local").unwrap_err();
        assert!(matches!(err, CompileError::UnknownWord { name, .. } if name == "local"));
    }

    #[test]
    fn top_level_variables_are_not_visible_in_functions() {
        let err = compile("1 set g def f ( ) g end").unwrap_err();
        assert!(matches!(err, CompileError::UnknownWord { name, .. } if name == "g"));
    }

    #[test]
    fn bad_number_literal() {
        let err = compile("1.2.3").unwrap_err();
        assert_eq!(
            err,
            CompileError::BadNumber {
                text: "1.2.3".to_string(),
                span: Span::new(0, 5),
            }
        );
    }

    #[test]
    fn unmatched_end() {
        assert!(matches!(
            compile("1 end").unwrap_err(),
            CompileError::UnmatchedEnd { .. }
        ));
    }

    #[test]
    fn unmatched_else() {
        assert!(matches!(
            compile("1 else").unwrap_err(),
            CompileError::UnmatchedElse { .. }
        ));
    }

    #[test]
    fn unmatched_do() {
        assert!(matches!(
            compile("1 do").unwrap_err(),
            CompileError::UnmatchedDo { .. }
        ));
    }

    #[test]
    fn double_else_is_unmatched() {
        assert!(matches!(
            compile("1 if 2 else 3 else 4 end").unwrap_err(),
            CompileError::UnmatchedElse { .. }
        ));
    }

    #[test]
    fn while_without_do() {
        let err = compile("while 1 end").unwrap_err();
        assert_eq!(
            err,
            CompileError::MissingDo {
                span: Span::new(0, 5),
            }
        );
    }

    #[test]
    fn unclosed_if_points_at_opener() {
        let err = compile("1 if 2").unwrap_err();
        assert_eq!(
            err,
            CompileError::UnclosedBlock {
                opener: "if",
                span: Span::new(2, 4),
            }
        );
    }

    #[test]
    fn unclosed_def_points_at_opener() {
        let err = compile("def f ( ) 1").unwrap_err();
        assert_eq!(
            err,
            CompileError::UnclosedBlock {
                opener: "def",
                span: Span::new(0, 3),
            }
        );
    }

    #[test]
    fn nested_def_rejected() {
        assert!(matches!(
            compile("def f ( ) def g ( ) end end").unwrap_err(),
            CompileError::NestedDef { .. }
        ));
    }

    #[test]
    fn def_inside_if_rejected() {
        assert!(matches!(
            compile("1 if def f ( ) end end").unwrap_err(),
            CompileError::NestedDef { .. }
        ));
    }

    #[test]
    fn duplicate_function_rejected() {
        let err = compile("def f ( ) end def f ( ) end").unwrap_err();
        assert!(matches!(err, CompileError::DuplicateFunction { name, .. } if name == "f"));
    }

    #[test]
    fn two_nameless_defs_are_not_duplicates() {
        // Both headers scan as unnamed; the first malformed header is
        // the error, at the token where the name should be.
        let err = compile("def 1 end def 2 end").unwrap_err();
        assert!(matches!(
            err,
            CompileError::ExpectedIdent { span, .. } if span == Span::new(4, 5)
        ));
    }

    #[test]
    fn duplicate_param_rejected() {
        assert!(matches!(
            compile("def f ( a a ) end").unwrap_err(),
            CompileError::DuplicateParam { name, .. } if name == "a"
        ));
    }

    #[test]
    fn variable_may_not_shadow_builtin() {
        assert!(matches!(
            compile("5 set dup").unwrap_err(),
            CompileError::ShadowedWord { name, .. } if name == "dup"
        ));
    }

    #[test]
    fn function_may_not_shadow_builtin() {
        assert!(matches!(
            compile("def puts ( ) end").unwrap_err(),
            CompileError::ShadowedWord { name, .. } if name == "puts"
        ));
    }

    #[test]
    fn param_may_not_shadow_function() {
        assert!(matches!(
            compile("def g ( ) end def f ( g ) end").unwrap_err(),
            CompileError::ShadowedWord { name, .. } if name == "g"
        ));
    }

    #[test]
    fn set_requires_identifier() {
        assert!(matches!(
            compile("5 set end").unwrap_err(),
            CompileError::ExpectedIdent { .. }
        ));
        assert!(matches!(
            compile("5 set").unwrap_err(),
            CompileError::ExpectedIdent { .. }
        ));
    }

    #[test]
    fn def_requires_param_list() {
        assert!(matches!(
            compile("def f 1 end").unwrap_err(),
            CompileError::ExpectedParams { .. }
        ));
    }

    #[test]
    fn stray_paren_rejected() {
        assert!(matches!(
            compile("( 1 2 )").unwrap_err(),
            CompileError::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn no_unpatched_targets_survive() {
        let program = compile(
            "def f ( n ) n 0 > if n 1 - f end end \
             3 f \
             while 1 0 < do 5 pop 1 0 < if end end",
        )
        .unwrap();
        for instr in &program.instructions {
            match instr.op {
                Op::Jump(t) | Op::JumpIfFalse(t) => {
                    assert!(t <= program.len(), "unpatched target in {instr:?}");
                }
                _ => {}
            }
        }
    }
}
