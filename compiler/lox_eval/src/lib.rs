//! Lox Eval - tree-walking evaluator and runtime object model for Lox.
//!
//! This crate executes `lox_ir` syntax trees directly.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Environment`: lexically nested scopes as a parent-linked chain of
//!   shared scope objects
//! - `evaluate_binary`: direct enum-based binary operator dispatch,
//!   including date subtraction
//! - `evaluate_unary`: direct enum-based unary operator dispatch
//! - `Callable`: the capability a call expression checks for, implemented by
//!   native and user functions
//! - `ControlAction`: the `Err` side of statement execution, carrying either
//!   a runtime error or a function's return value
//!
//! # Re-exports
//!
//! Error constructors are re-exported at the crate root for convenience
//! (canonical path is `lox_eval::errors::*`).

mod diagnostics;
mod environment;
pub mod errors;
pub mod interpreter;
mod natives;
mod operators;
mod print_handler;
mod stack;
mod unary_operators;
mod value;

pub use errors::{
    // Operator errors
    binary_type_mismatch, invalid_operand,
    // Call errors
    not_callable, recursion_limit_exceeded, wrong_arg_count,
    // Binding errors
    invalid_superclass, redefinition, undefined_variable,
    // Control flow errors
    return_outside_function,
};
pub use errors::{
    BacktraceFrame, ControlAction, ErrorCategory, EvalBacktrace, EvalError, EvalErrorKind,
    EvalResult, ExecResult,
};

pub use diagnostics::{CallFrame, CallStack};
pub use environment::{AssignError, DefineError, Environment, LocalScope, Scope};
pub use interpreter::{Interpreter, InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use natives::PRELUDE;
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandlerImpl, SharedPrintHandler,
};
pub use stack::ensure_sufficient_stack;
pub use unary_operators::evaluate_unary;
pub use value::{Callable, LoxClass, LoxFunction, LoxInstance, NativeFn, NativeFunction, Value};

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
