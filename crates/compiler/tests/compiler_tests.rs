//! Integration tests for the nib compiler.
//!
//! Tests cover:
//! - Complete programs: loops, functions, recursion, drawing scripts
//! - Exact instruction layouts and patched jump targets
//! - Forward calls and the function table
//! - Compile-time rejection of malformed programs
//! - Disassembly of full programs

use nib_common::{Builtin, Op, Program, Span};
use nib_compiler::{compile, disassemble, CompileError};

// ---- Test helpers ----

/// Compile source that is expected to be valid.
fn ok(source: &str) -> Program {
    compile(source).unwrap_or_else(|err| panic!("compile failed: {err}"))
}

fn op_at(program: &Program, index: usize) -> &Op {
    &program.instructions[index].op
}

/// Compare instruction streams ignoring spans.
fn same_ops(a: &Program, b: &Program) {
    let left: Vec<&Op> = a.instructions.iter().map(|i| &i.op).collect();
    let right: Vec<&Op> = b.instructions.iter().map(|i| &i.op).collect();
    assert_eq!(left, right);
}

// ---- Complete programs ----

#[test]
fn iterative_fibonacci_layout() {
    let program = ok(
        "0 set a 1 set b 0 set i \
         while i 10 < do \
           a b + set t \
           b set a \
           t set b \
           i 1 + set i \
         end \
         a puts",
    );

    assert_eq!(program.instructions.len(), 25);
    // Loop condition starts after the three initial stores.
    assert_eq!(op_at(&program, 6), &Op::Load("i".to_string()));
    // Exit jump lands just past the backward jump.
    assert_eq!(op_at(&program, 9), &Op::JumpIfFalse(23));
    assert_eq!(op_at(&program, 22), &Op::Jump(6));
    assert_eq!(op_at(&program, 24), &Op::Builtin(Builtin::Puts));
    assert!(program.functions.is_empty());
}

#[test]
fn recursive_fibonacci_layout() {
    let program = ok(
        "def fib ( n ) \
           n 2 < if \
             n \
           else \
             n 1 - fib \
             n 2 - fib \
             + \
           end \
         end \
         10 fib puts",
    );

    assert_eq!(program.instructions.len(), 20);
    // Guard jump skips the whole body.
    assert_eq!(op_at(&program, 0), &Op::Jump(17));
    assert_eq!(op_at(&program, 4), &Op::JumpIfFalse(7));
    assert_eq!(op_at(&program, 6), &Op::Jump(16));
    assert_eq!(op_at(&program, 16), &Op::Return);

    assert_eq!(program.functions.len(), 1);
    assert_eq!(program.functions[0].name, "fib");
    assert_eq!(program.functions[0].entry, 1);

    let calls = program
        .instructions
        .iter()
        .filter(|i| i.op == Op::Call(0))
        .count();
    assert_eq!(calls, 3);
}

#[test]
fn forward_call_before_definition() {
    let program = ok("5 double puts def double ( x ) x 2 * end");

    assert_eq!(op_at(&program, 1), &Op::Call(0));
    assert_eq!(program.functions.len(), 1);
    assert_eq!(program.functions[0].name, "double");
    assert_eq!(program.functions[0].entry, 4);
}

#[test]
fn multiple_functions_get_distinct_indices() {
    let program = ok(
        "def inc ( n ) n 1 + end \
         def dec ( n ) n 1 - end \
         5 inc dec puts",
    );

    assert_eq!(program.functions.len(), 2);
    assert_eq!(program.functions[0].name, "inc");
    assert_eq!(program.functions[0].entry, 1);
    assert_eq!(program.functions[1].name, "dec");
    assert_eq!(program.functions[1].entry, 6);
    assert_eq!(op_at(&program, 11), &Op::Call(0));
    assert_eq!(op_at(&program, 12), &Op::Call(1));
}

#[test]
fn drawing_script_layout() {
    let program = ok(
        "255 0 0 set_fill_style \
         10 10 100 50 rectangle \
         begin_path \
         20 20 move_to \
         80 40 line_to \
         stroke",
    );

    assert_eq!(program.instructions.len(), 17);
    assert_eq!(op_at(&program, 3), &Op::Builtin(Builtin::SetFillStyle));
    assert_eq!(op_at(&program, 8), &Op::Builtin(Builtin::Rectangle));
    assert_eq!(op_at(&program, 9), &Op::Builtin(Builtin::BeginPath));
    assert_eq!(op_at(&program, 12), &Op::Builtin(Builtin::MoveTo));
    assert_eq!(op_at(&program, 15), &Op::Builtin(Builtin::LineTo));
    assert_eq!(op_at(&program, 16), &Op::Builtin(Builtin::Stroke));
}

#[test]
fn nested_loops_layout() {
    let program = ok(
        "0 set i \
         while i 3 < do \
           0 set j \
           while j 3 < do \
             j 1 + set j \
           end \
           i 1 + set i \
         end",
    );

    assert_eq!(program.instructions.len(), 22);
    assert_eq!(op_at(&program, 5), &Op::JumpIfFalse(22));
    assert_eq!(op_at(&program, 11), &Op::JumpIfFalse(17));
    assert_eq!(op_at(&program, 16), &Op::Jump(8));
    assert_eq!(op_at(&program, 21), &Op::Jump(2));
}

#[test]
fn nested_conditionals_layout() {
    let program = ok(
        "5 set x \
         x 0 < if \
           1 puts \
         else \
           x 0 > if \
             2 puts \
           else \
             3 puts \
           end \
         end",
    );

    assert_eq!(program.instructions.len(), 18);
    assert_eq!(op_at(&program, 5), &Op::JumpIfFalse(9));
    assert_eq!(op_at(&program, 8), &Op::Jump(18));
    assert_eq!(op_at(&program, 12), &Op::JumpIfFalse(16));
    assert_eq!(op_at(&program, 15), &Op::Jump(18));
}

// ---- Comments and whitespace ----

#[test]
fn comments_do_not_change_the_instruction_stream() {
    let commented = ok(
        "# iterative countdown\n\
         10 set n\n\
         \n\
         while n 0 > do\n\
           n puts        # show each value\n\
           n 1 - set n\n\
         end\n",
    );
    let flat = ok("10 set n while n 0 > do n puts n 1 - set n end");
    same_ops(&commented, &flat);
}

// ---- Rejection of malformed programs ----

#[test]
fn rejects_unknown_word_with_position() {
    let err = compile("10 20 bogus").unwrap_err();
    match err {
        CompileError::UnknownWord { name, span } => {
            assert_eq!(name, "bogus");
            assert_eq!(span, Span::new(6, 11));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn rejects_unclosed_while() {
    let err = compile("while 1 do 2 puts").unwrap_err();
    assert!(matches!(
        err,
        CompileError::UnclosedBlock { opener: "while", .. }
    ));
}

#[test]
fn rejects_unclosed_def() {
    let err = compile("def f ( )").unwrap_err();
    assert!(matches!(
        err,
        CompileError::UnclosedBlock { opener: "def", .. }
    ));
}

#[test]
fn rejects_stray_end() {
    let err = compile("1 2 + end").unwrap_err();
    assert!(matches!(err, CompileError::UnmatchedEnd { .. }));
}

#[test]
fn rejects_else_outside_if() {
    let err = compile("else").unwrap_err();
    assert!(matches!(err, CompileError::UnmatchedElse { .. }));
}

#[test]
fn rejects_while_without_do() {
    let err = compile("while 1 end").unwrap_err();
    assert!(matches!(err, CompileError::MissingDo { .. }));
}

#[test]
fn rejects_def_inside_loop() {
    let err = compile("while 1 do def f ( ) end end").unwrap_err();
    assert!(matches!(err, CompileError::NestedDef { .. }));
}

#[test]
fn rejects_variable_shadowing_a_function() {
    let err = compile("def f ( ) 1 end 2 set f").unwrap_err();
    assert!(matches!(err, CompileError::ShadowedWord { .. }));
}

#[test]
fn rejects_duplicate_function_names() {
    let err = compile("def f ( ) 1 end def f ( ) 2 end").unwrap_err();
    assert!(matches!(err, CompileError::DuplicateFunction { .. }));
}

// ---- Disassembly ----

#[test]
fn disassembly_of_a_full_program() {
    let program = ok("def fib ( n ) n 2 < if n else n 1 - fib n 2 - fib + end end 10 fib puts");
    let text = disassemble(&program);

    assert!(text.contains("call 0"));
    assert!(text.contains("jump_false"));
    assert!(text.contains("functions:"));
    assert!(text.contains("fib(n)  entry 1"));
}

#[test]
fn disassembly_line_count_matches_program() {
    let program = ok("1 2 + puts");
    let text = disassemble(&program);
    assert_eq!(text.lines().count(), program.instructions.len());
}
