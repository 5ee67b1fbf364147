//! AST node definitions.
//!
//! Two disjoint families, expressions and statements, each a closed enum.
//! The front end produces these trees already validated; the evaluator
//! never re-checks syntax.
//!
//! Every node type offers constructors with a dummy span (`Expr::number`,
//! `Stmt::print`, ...) so hosts and tests can assemble programs directly.

mod expr;
mod operators;
mod stmt;

pub use expr::{Expr, ExprKind, Literal};
pub use operators::{BinaryOp, LogicalOp, UnaryOp};
pub use stmt::{ClassDecl, FunctionDecl, Program, Stmt, StmtKind};
