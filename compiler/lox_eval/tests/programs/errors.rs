use crate::common::{run_category, Harness};
use lox_eval::{ErrorCategory, EvalErrorKind};
use lox_ir::{BinaryOp, Expr, Span, Stmt};
use pretty_assertions::assert_eq;

#[test]
fn calling_a_number_is_type_error() {
    let mut harness = Harness::new();
    let (err, _) = harness.run_err(vec![Stmt::expression(Expr::call(
        Expr::number(3.0),
        Vec::new(),
    ))]);
    assert_eq!(err.category(), ErrorCategory::RuntimeTypeError);
    assert_eq!(err.to_string(), "RuntimeTypeError: number is not callable");
}

#[test]
fn callee_checked_before_arguments() {
    // "str"(x = 1) must fail without running the assignment.
    let mut harness = Harness::new();
    let x = harness.name("x");
    let (err, _) = harness.run_err(vec![
        Stmt::var(x, Some(Expr::number(0.0))),
        Stmt::expression(Expr::call(
            Expr::string("str"),
            vec![Expr::assign(x, Expr::number(1.0))],
        )),
    ]);
    assert_eq!(
        err.kind,
        EvalErrorKind::NotCallable {
            type_name: "string"
        }
    );
    assert_eq!(
        harness.interpreter().global("x"),
        Some(lox_eval::Value::Number(0.0))
    );
}

#[test]
fn wrong_argument_count() {
    let mut harness = Harness::new();
    let f = harness.name("f");
    let a = harness.name("a");
    let (err, _) = harness.run_err(vec![
        Stmt::function(f, vec![a], Vec::new()),
        Stmt::expression(Expr::call(Expr::identifier(f), Vec::new())),
    ]);
    assert_eq!(err.category(), ErrorCategory::RuntimeTypeError);
    assert_eq!(
        err.to_string(),
        "RuntimeTypeError: wrong number of arguments: f expects 1, got 0"
    );
}

#[test]
fn native_arity_is_checked() {
    let category = run_category(|h| {
        let clock = h.name("clock");
        vec![Stmt::expression(Expr::call(
            Expr::identifier(clock),
            vec![Expr::number(1.0)],
        ))]
    });
    assert_eq!(category, ErrorCategory::RuntimeTypeError);
}

#[test]
fn undefined_variable_message() {
    let mut harness = Harness::new();
    let ghost = harness.name("ghost");
    let (err, _) = harness.run_err(vec![Stmt::print(
        Expr::identifier(ghost).at(Span::new(6, 11)),
    )]);
    assert_eq!(err.to_string(), "RuntimeNameError: undefined variable: ghost");
    assert_eq!(err.span, Some(Span::new(6, 11)));
    assert!(err.backtrace.is_none());
}

#[test]
fn top_level_return_is_runtime_error() {
    let mut harness = Harness::new();
    let (err, output) = harness.run_err(vec![
        Stmt::print(Expr::string("before")),
        Stmt::return_value(Some(Expr::number(1.0))),
        Stmt::print(Expr::string("after")),
    ]);
    assert_eq!(err.category(), ErrorCategory::RuntimeError);
    assert_eq!(err.kind, EvalErrorKind::ReturnOutsideFunction);
    assert_eq!(output, "before\n");
}

#[test]
fn operand_errors_stop_the_program() {
    let mut harness = Harness::new();
    let (err, output) = harness.run_err(vec![
        Stmt::print(Expr::number(1.0)),
        Stmt::print(Expr::binary(
            Expr::string("a"),
            BinaryOp::Sub,
            Expr::string("b"),
        )),
        Stmt::print(Expr::number(2.0)),
    ]);
    assert_eq!(
        err.to_string(),
        "RuntimeTypeError: operator `-` cannot be applied to string and string"
    );
    assert_eq!(output, "1\n");
}

#[test]
fn date_plus_number_is_type_error() {
    let category = run_category(|_| {
        vec![Stmt::print(Expr::binary(
            Expr::date(crate::common::date(2024, 1, 1)),
            BinaryOp::Add,
            Expr::number(1.0),
        ))]
    });
    assert_eq!(category, ErrorCategory::RuntimeTypeError);
}

#[test]
fn error_inside_function_carries_backtrace() {
    // fun inner() { return -"x"; } fun outer() { return inner(); } outer();
    let mut harness = Harness::new();
    let inner = harness.name("inner");
    let outer = harness.name("outer");
    let (err, _) = harness.run_err(vec![
        Stmt::function(
            inner,
            Vec::new(),
            vec![Stmt::return_value(Some(Expr::unary(
                lox_ir::UnaryOp::Neg,
                Expr::string("x"),
            )))],
        ),
        Stmt::function(
            outer,
            Vec::new(),
            vec![Stmt::return_value(Some(Expr::call(
                Expr::identifier(inner),
                Vec::new(),
            )))],
        ),
        Stmt::expression(Expr::call(Expr::identifier(outer), Vec::new()).at(Span::new(40, 47))),
    ]);

    assert_eq!(err.category(), ErrorCategory::RuntimeTypeError);
    let backtrace = err.backtrace.unwrap();
    let names: Vec<_> = backtrace.frames().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["inner", "outer"]);
    assert_eq!(backtrace.frames()[1].span, Some(Span::new(40, 47)));
}
