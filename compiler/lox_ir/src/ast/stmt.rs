//! Statement nodes and declarations.

use std::fmt;
use std::rc::Rc;

use super::expr::Expr;
use crate::{Name, Span};

/// Statement node.
#[derive(Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

/// Statement kinds.
#[derive(Clone, PartialEq, Debug)]
pub enum StmtKind {
    /// Expression evaluated for its side effects.
    Expression(Expr),

    Print(Expr),

    /// `var name = initializer;` (a missing initializer means `nil`).
    Var {
        name: Name,
        initializer: Option<Expr>,
    },

    Block(Vec<Stmt>),

    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    While {
        condition: Expr,
        body: Box<Stmt>,
    },

    /// Function declarations are shared with every closure created from them.
    Function(Rc<FunctionDecl>),

    Return(Option<Expr>),

    Class(ClassDecl),
}

/// `fun name(params) { body }`
#[derive(Clone, PartialEq, Debug)]
pub struct FunctionDecl {
    pub name: Name,
    pub params: Vec<Name>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl FunctionDecl {
    pub fn new(name: Name, params: Vec<Name>, body: Vec<Stmt>) -> Self {
        FunctionDecl {
            name,
            params,
            body,
            span: Span::DUMMY,
        }
    }

    /// Declared parameter count.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// `class Name < Superclass { methods }`
#[derive(Clone, PartialEq, Debug)]
pub struct ClassDecl {
    pub name: Name,
    pub superclass: Option<Name>,
    pub methods: Vec<Rc<FunctionDecl>>,
}

/// A whole parsed program: the statements of one source unit, in order.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Program {
    pub body: Vec<Stmt>,
}

impl Program {
    pub fn new(body: Vec<Stmt>) -> Self {
        Program { body }
    }
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }

    /// Build a node with a dummy span.
    pub fn synthetic(kind: StmtKind) -> Self {
        Stmt::new(kind, Span::DUMMY)
    }

    pub fn expression(expr: Expr) -> Self {
        Self::synthetic(StmtKind::Expression(expr))
    }

    pub fn print(expr: Expr) -> Self {
        Self::synthetic(StmtKind::Print(expr))
    }

    pub fn var(name: Name, initializer: Option<Expr>) -> Self {
        Self::synthetic(StmtKind::Var { name, initializer })
    }

    pub fn block(body: Vec<Stmt>) -> Self {
        Self::synthetic(StmtKind::Block(body))
    }

    pub fn if_else(condition: Expr, then_branch: Stmt, else_branch: Option<Stmt>) -> Self {
        Self::synthetic(StmtKind::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        })
    }

    pub fn while_loop(condition: Expr, body: Stmt) -> Self {
        Self::synthetic(StmtKind::While {
            condition,
            body: Box::new(body),
        })
    }

    pub fn function(name: Name, params: Vec<Name>, body: Vec<Stmt>) -> Self {
        Self::synthetic(StmtKind::Function(Rc::new(FunctionDecl::new(
            name, params, body,
        ))))
    }

    pub fn return_value(value: Option<Expr>) -> Self {
        Self::synthetic(StmtKind::Return(value))
    }

    pub fn class(name: Name, superclass: Option<Name>, methods: Vec<FunctionDecl>) -> Self {
        Self::synthetic(StmtKind::Class(ClassDecl {
            name,
            superclass,
            methods: methods.into_iter().map(Rc::new).collect(),
        }))
    }

    /// Replace the span, keeping the kind.
    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}
