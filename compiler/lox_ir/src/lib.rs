//! Lox IR - identifiers and syntax tree types.
//!
//! This crate holds the data handed from the front end to the evaluator:
//! - Spans for source locations
//! - Names for interned identifiers
//! - AST nodes (`Expr`, `Stmt`, `Program`)
//!
//! # Design Philosophy
//!
//! - **Intern identifiers**: strings → `Name(u32)`, so scope lookups hash a
//!   single integer.
//! - **Closed node sets**: `ExprKind` and `StmtKind` are plain enums; the
//!   evaluator matches them exhaustively.
//! - **Immutable after construction**: the evaluator only ever reads trees.
//!   Function bodies sit behind `Rc` so closures can share them without
//!   copying.

pub mod ast;
mod interner;
mod name;
mod span;

pub use ast::{
    BinaryOp, ClassDecl, Expr, ExprKind, FunctionDecl, Literal, LogicalOp, Program, Stmt,
    StmtKind, UnaryOp,
};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use span::Span;

/// Re-exported so callers can build date literals without naming `chrono`.
pub use chrono::NaiveDate;
