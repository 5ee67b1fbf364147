//! Runtime errors and the control-transfer signal.
//!
//! All evaluation errors are built through the factory functions in this
//! module, so message wording lives in one place (`EvalErrorKind`'s
//! `Display`).
//!
//! # Categories
//!
//! Every kind belongs to one category, which is what a driver shows in front
//! of the message (`RuntimeTypeError: ...`):
//!
//! | Category            | Kinds                                                     |
//! |---------------------|-----------------------------------------------------------|
//! | `RuntimeTypeError`  | invalid operand, operand mismatch, not callable, arity, superclass |
//! | `RuntimeNameError`  | undefined variable                                        |
//! | `RedefinitionError` | redefinition in the same scope                            |
//! | `RecursionError`    | call depth limit exceeded                                 |
//! | `RuntimeError`      | `return` escaping to the program top                      |

use std::fmt;

use lox_ir::Span;

use crate::Value;

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, EvalError>;

/// Result of executing a statement.
pub type ExecResult = Result<(), ControlAction>;

/// Error category, the `<ErrorKind>` part of a rendered error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    RuntimeTypeError,
    RuntimeNameError,
    RedefinitionError,
    RecursionError,
    RuntimeError,
}

impl ErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RuntimeTypeError => "RuntimeTypeError",
            Self::RuntimeNameError => "RuntimeNameError",
            Self::RedefinitionError => "RedefinitionError",
            Self::RecursionError => "RecursionError",
            Self::RuntimeError => "RuntimeError",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed error kind.
///
/// Carries the structured data for the failure; `Display` produces the
/// human-readable message without the category prefix.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    /// Unary operator applied to the wrong kind of operand.
    #[error("operator `{op}` cannot be applied to {type_name}")]
    InvalidOperand {
        op: &'static str,
        type_name: &'static str,
    },

    /// Binary operator applied to an unsupported pair of kinds.
    #[error("operator `{op}` cannot be applied to {left} and {right}")]
    BinaryTypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("{type_name} is not callable")]
    NotCallable { type_name: &'static str },

    #[error("wrong number of arguments: {name} expects {expected}, got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("superclass must be a class, got {type_name}")]
    InvalidSuperclass { type_name: &'static str },

    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },

    #[error("variable already defined in this scope: {name}")]
    Redefinition { name: String },

    #[error("maximum recursion depth exceeded (limit: {depth})")]
    RecursionLimit { depth: usize },

    #[error("return outside of a function")]
    ReturnOutsideFunction,
}

impl EvalErrorKind {
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidOperand { .. }
            | Self::BinaryTypeMismatch { .. }
            | Self::NotCallable { .. }
            | Self::ArityMismatch { .. }
            | Self::InvalidSuperclass { .. } => ErrorCategory::RuntimeTypeError,
            Self::UndefinedVariable { .. } => ErrorCategory::RuntimeNameError,
            Self::Redefinition { .. } => ErrorCategory::RedefinitionError,
            Self::RecursionLimit { .. } => ErrorCategory::RecursionError,
            Self::ReturnOutsideFunction => ErrorCategory::RuntimeError,
        }
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Function name.
    pub name: String,
    /// Source location of the call site.
    pub span: Option<Span>,
}

/// Snapshot of the call stack at an error site, most recent call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if let Some(span) = frame.span {
                write!(f, " at {span}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Runtime error raised by the evaluator.
///
/// Renders as `<category>: <message>`, the form drivers print.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{}: {}", .kind.category(), .kind)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Innermost source location that produced the error, if known.
    pub span: Option<Span>,
    /// Call stack at the error site, attached when it leaves a function.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            span: None,
            backtrace: None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Message without the category prefix.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Attach a span unless one was already recorded closer to the failure.
    ///
    /// Dummy spans from hand-built trees are ignored.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        if self.span.is_none() && span != Span::DUMMY {
            self.span = Some(span);
        }
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

/// Non-local exit from statement execution.
///
/// `Return` is not an error: it carries a function's result up to the call
/// boundary, which is the only place that consumes it. `Error` carries a
/// runtime error through the same unwinding path, distinguishable by
/// variant.
#[derive(Clone, Debug)]
pub enum ControlAction {
    Return(Value),
    Error(EvalError),
}

impl ControlAction {
    /// Convert into an error at a boundary where `return` is not allowed.
    pub fn into_eval_error(self) -> EvalError {
        match self {
            ControlAction::Error(err) => err,
            ControlAction::Return(_) => return_outside_function(),
        }
    }

    pub fn is_return(&self) -> bool {
        matches!(self, ControlAction::Return(_))
    }
}

impl From<EvalError> for ControlAction {
    fn from(err: EvalError) -> Self {
        ControlAction::Error(err)
    }
}

// Operator errors

pub fn invalid_operand(op: &'static str, type_name: &'static str) -> EvalError {
    EvalErrorKind::InvalidOperand { op, type_name }.into()
}

pub fn binary_type_mismatch(
    op: &'static str,
    left: &'static str,
    right: &'static str,
) -> EvalError {
    EvalErrorKind::BinaryTypeMismatch { op, left, right }.into()
}

// Call errors

pub fn not_callable(type_name: &'static str) -> EvalError {
    EvalErrorKind::NotCallable { type_name }.into()
}

pub fn wrong_arg_count(name: &str, expected: usize, got: usize) -> EvalError {
    EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    }
    .into()
}

pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalErrorKind::RecursionLimit { depth }.into()
}

// Binding errors

pub fn undefined_variable(name: &str) -> EvalError {
    EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    }
    .into()
}

pub fn redefinition(name: &str) -> EvalError {
    EvalErrorKind::Redefinition {
        name: name.to_string(),
    }
    .into()
}

pub fn invalid_superclass(type_name: &'static str) -> EvalError {
    EvalErrorKind::InvalidSuperclass { type_name }.into()
}

// Control flow errors

pub fn return_outside_function() -> EvalError {
    EvalErrorKind::ReturnOutsideFunction.into()
}
