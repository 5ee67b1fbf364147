use crate::common::{run_category, run_ok, Harness};
use lox_eval::{ErrorCategory, Value};
use lox_ir::{Expr, FunctionDecl, Stmt};
use pretty_assertions::assert_eq;

#[test]
fn class_declaration_defines_class_value() {
    let output = run_ok(|h| {
        let point = h.name("Point");
        vec![
            Stmt::class(point, None, Vec::new()),
            Stmt::print(Expr::identifier(point)),
        ]
    });
    assert_eq!(output, "<class Point>\n");
}

#[test]
fn methods_resolve_through_superclass() {
    let mut harness = Harness::new();
    let base = harness.name("Base");
    let derived = harness.name("Derived");
    let greet = harness.name("greet");
    let own = harness.name("own");

    harness
        .run(vec![
            Stmt::class(
                base,
                None,
                vec![FunctionDecl::new(
                    greet,
                    Vec::new(),
                    vec![Stmt::return_value(Some(Expr::string("hi")))],
                )],
            ),
            Stmt::class(
                derived,
                Some(base),
                vec![FunctionDecl::new(own, Vec::new(), Vec::new())],
            ),
        ])
        .unwrap();

    let Some(Value::Class(class)) = harness.interpreter().global("Derived") else {
        panic!("Derived should be a class");
    };
    assert_eq!(class.name(), "Derived");
    assert_eq!(class.superclass().map(|s| s.name()), Some("Base"));
    assert_eq!(class.methods().len(), 1);
    assert!(class.find_method(greet).is_some());
    assert!(class.find_method(own).is_some());
    assert!(class.find_method(base).is_none());
}

#[test]
fn undefined_superclass_is_name_error() {
    let category = run_category(|h| {
        let child = h.name("Child");
        let missing = h.name("Missing");
        vec![Stmt::class(child, Some(missing), Vec::new())]
    });
    assert_eq!(category, ErrorCategory::RuntimeNameError);
}

#[test]
fn non_class_superclass_is_type_error() {
    let mut harness = Harness::new();
    let child = harness.name("Child");
    let number = harness.name("number");
    let (err, _) = harness.run_err(vec![
        Stmt::var(number, Some(Expr::number(1.0))),
        Stmt::class(child, Some(number), Vec::new()),
    ]);
    assert_eq!(
        err.to_string(),
        "RuntimeTypeError: superclass must be a class, got number"
    );
}

#[test]
fn classes_are_not_callable() {
    let category = run_category(|h| {
        let point = h.name("Point");
        vec![
            Stmt::class(point, None, Vec::new()),
            Stmt::expression(Expr::call(Expr::identifier(point), Vec::new())),
        ]
    });
    assert_eq!(category, ErrorCategory::RuntimeTypeError);
}

#[test]
fn class_redefinition_fails() {
    let category = run_category(|h| {
        let point = h.name("Point");
        vec![
            Stmt::class(point, None, Vec::new()),
            Stmt::class(point, None, Vec::new()),
        ]
    });
    assert_eq!(category, ErrorCategory::RedefinitionError);
}
