//! Expression nodes.

use std::fmt;

use chrono::NaiveDate;

use super::operators::{BinaryOp, LogicalOp, UnaryOp};
use crate::{Name, Span};

/// Constant embedded in the source.
#[derive(Clone, PartialEq, Debug)]
pub enum Literal {
    Number(f64),
    Str(String),
    Bool(bool),
    Nil,
    /// Quoted date literal (`'2025-11-27`).
    Date(NaiveDate),
}

/// Expression node.
#[derive(Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// Expression kinds.
#[derive(Clone, PartialEq, Debug)]
pub enum ExprKind {
    Literal(Literal),

    /// `[e1, e2, ...]`, elements evaluated left to right.
    Array(Vec<Expr>),

    Identifier(Name),

    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },

    /// `and` / `or`, right side evaluated only when needed.
    Logical {
        left: Box<Expr>,
        op: LogicalOp,
        right: Box<Expr>,
    },

    /// Parenthesized expression.
    Grouping(Box<Expr>),

    /// `name = value`; yields the assigned value.
    Assign {
        name: Name,
        value: Box<Expr>,
    },

    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Build a node with a dummy span.
    pub fn synthetic(kind: ExprKind) -> Self {
        Expr::new(kind, Span::DUMMY)
    }

    pub fn number(value: f64) -> Self {
        Self::synthetic(ExprKind::Literal(Literal::Number(value)))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::synthetic(ExprKind::Literal(Literal::Str(value.into())))
    }

    pub fn bool(value: bool) -> Self {
        Self::synthetic(ExprKind::Literal(Literal::Bool(value)))
    }

    pub fn nil() -> Self {
        Self::synthetic(ExprKind::Literal(Literal::Nil))
    }

    pub fn date(value: NaiveDate) -> Self {
        Self::synthetic(ExprKind::Literal(Literal::Date(value)))
    }

    pub fn array(elements: Vec<Expr>) -> Self {
        Self::synthetic(ExprKind::Array(elements))
    }

    pub fn identifier(name: Name) -> Self {
        Self::synthetic(ExprKind::Identifier(name))
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Self::synthetic(ExprKind::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Self::synthetic(ExprKind::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    pub fn logical(left: Expr, op: LogicalOp, right: Expr) -> Self {
        Self::synthetic(ExprKind::Logical {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    pub fn grouping(inner: Expr) -> Self {
        Self::synthetic(ExprKind::Grouping(Box::new(inner)))
    }

    pub fn assign(name: Name, value: Expr) -> Self {
        Self::synthetic(ExprKind::Assign {
            name,
            value: Box::new(value),
        })
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Self::synthetic(ExprKind::Call {
            callee: Box::new(callee),
            args,
        })
    }

    /// Replace the span, keeping the kind.
    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}
