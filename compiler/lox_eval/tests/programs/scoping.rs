use crate::common::{run_category, run_ok, Harness};
use lox_eval::{ErrorCategory, EvalErrorKind};
use lox_ir::{Expr, Stmt};
use pretty_assertions::assert_eq;

#[test]
fn block_bindings_do_not_leak() {
    // { var x = 1; } print x;
    let category = run_category(|h| {
        let x = h.name("x");
        vec![
            Stmt::block(vec![Stmt::var(x, Some(Expr::number(1.0)))]),
            Stmt::print(Expr::identifier(x)),
        ]
    });
    assert_eq!(category, ErrorCategory::RuntimeNameError);
}

#[test]
fn redefinition_in_same_scope_fails() {
    let mut harness = Harness::new();
    let x = harness.name("x");
    let (err, output) = harness.run_err(vec![
        Stmt::var(x, Some(Expr::number(1.0))),
        Stmt::print(Expr::identifier(x)),
        Stmt::var(x, Some(Expr::number(2.0))),
        Stmt::print(Expr::string("unreached")),
    ]);
    assert_eq!(err.category(), ErrorCategory::RedefinitionError);
    assert_eq!(
        err.kind,
        EvalErrorKind::Redefinition {
            name: "x".to_string()
        }
    );
    assert_eq!(output, "1\n");
}

#[test]
fn redefinition_inside_block_fails() {
    let category = run_category(|h| {
        let x = h.name("x");
        vec![Stmt::block(vec![
            Stmt::var(x, None),
            Stmt::var(x, None),
        ])]
    });
    assert_eq!(category, ErrorCategory::RedefinitionError);
}

#[test]
fn nested_scope_shadows() {
    // var x = "outer"; { var x = "inner"; print x; } print x;
    let output = run_ok(|h| {
        let x = h.name("x");
        vec![
            Stmt::var(x, Some(Expr::string("outer"))),
            Stmt::block(vec![
                Stmt::var(x, Some(Expr::string("inner"))),
                Stmt::print(Expr::identifier(x)),
            ]),
            Stmt::print(Expr::identifier(x)),
        ]
    });
    assert_eq!(output, "inner\nouter\n");
}

#[test]
fn assignment_reaches_enclosing_scope() {
    // var x = 1; { { x = 2; } } print x;
    let output = run_ok(|h| {
        let x = h.name("x");
        vec![
            Stmt::var(x, Some(Expr::number(1.0))),
            Stmt::block(vec![Stmt::block(vec![Stmt::expression(Expr::assign(
                x,
                Expr::number(2.0),
            ))])]),
            Stmt::print(Expr::identifier(x)),
        ]
    });
    assert_eq!(output, "2\n");
}

#[test]
fn assignment_targets_nearest_binding() {
    // var x = 1; { var x = 10; x = 20; print x; } print x;
    let output = run_ok(|h| {
        let x = h.name("x");
        vec![
            Stmt::var(x, Some(Expr::number(1.0))),
            Stmt::block(vec![
                Stmt::var(x, Some(Expr::number(10.0))),
                Stmt::expression(Expr::assign(x, Expr::number(20.0))),
                Stmt::print(Expr::identifier(x)),
            ]),
            Stmt::print(Expr::identifier(x)),
        ]
    });
    assert_eq!(output, "20\n1\n");
}

#[test]
fn assignment_never_creates_binding() {
    let mut harness = Harness::new();
    let y = harness.name("y");
    let (err, _) = harness.run_err(vec![Stmt::expression(Expr::assign(y, Expr::number(1.0)))]);
    assert_eq!(err.category(), ErrorCategory::RuntimeNameError);
    assert!(harness.interpreter().global("y").is_none());
}

#[test]
fn assignment_is_an_expression() {
    // var a; var b; a = b = 3; print a; print b;
    let output = run_ok(|h| {
        let a = h.name("a");
        let b = h.name("b");
        vec![
            Stmt::var(a, None),
            Stmt::var(b, None),
            Stmt::expression(Expr::assign(a, Expr::assign(b, Expr::number(3.0)))),
            Stmt::print(Expr::identifier(a)),
            Stmt::print(Expr::identifier(b)),
        ]
    });
    assert_eq!(output, "3\n3\n");
}

#[test]
fn missing_initializer_is_nil() {
    let output = run_ok(|h| {
        let x = h.name("x");
        vec![Stmt::var(x, None), Stmt::print(Expr::identifier(x))]
    });
    assert_eq!(output, "nil\n");
}

#[test]
fn initializer_sees_outer_binding() {
    // var x = 1; { var x = x + 1; print x; }
    let output = run_ok(|h| {
        let x = h.name("x");
        vec![
            Stmt::var(x, Some(Expr::number(1.0))),
            Stmt::block(vec![
                Stmt::var(
                    x,
                    Some(Expr::binary(
                        Expr::identifier(x),
                        lox_ir::BinaryOp::Add,
                        Expr::number(1.0),
                    )),
                ),
                Stmt::print(Expr::identifier(x)),
            ]),
        ]
    });
    assert_eq!(output, "2\n");
}
