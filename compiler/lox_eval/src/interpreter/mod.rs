//! Tree-walking interpreter for Lox.
//!
//! # Architecture
//!
//! - `evaluate(expr, env)` dispatches over `ExprKind` and produces a `Value`
//!   or an `EvalError`.
//! - `execute(stmt, env)` dispatches over `StmtKind` and produces effects.
//!   Its `Err` side is a `ControlAction`: either a runtime error or the
//!   return signal, which only the user-function call boundary consumes
//!   (see `function_call.rs`).
//! - The environment is passed explicitly. Blocks and calls create child
//!   scopes; a call's scope is parented to the callee's closure, never the
//!   caller's, which is what makes scoping lexical.
//!
//! Every `evaluate`/`execute` goes through `ensure_sufficient_stack`, and
//! user calls are counted on a `CallStack` with a configurable depth limit.

mod builder;
mod function_call;

pub use builder::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};

use std::rc::Rc;

use lox_ir::{
    ClassDecl, Expr, ExprKind, LogicalOp, Name, Program, SharedInterner, Span, Stmt, StmtKind,
};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::diagnostics::CallStack;
use crate::errors::{
    invalid_superclass, not_callable, redefinition, undefined_variable, wrong_arg_count,
    ControlAction, EvalError, EvalResult, ExecResult,
};
use crate::print_handler::SharedPrintHandler;
use crate::stack::ensure_sufficient_stack;
use crate::{
    evaluate_binary, evaluate_unary, Callable, Environment, LoxClass, LoxFunction, NativeFn,
    NativeFunction, Value,
};

/// Tree-walking interpreter.
///
/// Owns the root environment, so successive `run` calls (one per REPL line,
/// say) see each other's global definitions.
pub struct Interpreter {
    interner: SharedInterner,
    globals: Environment,
    print_handler: SharedPrintHandler,
    call_stack: CallStack,
}

impl Interpreter {
    /// Interpreter with default configuration: stdout output, the native
    /// prelude, and the default call depth limit.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Run a whole program against the root environment.
    ///
    /// A `return` that escapes to the top level is reported as a
    /// `RuntimeError` rather than leaking the control signal.
    pub fn run(&mut self, program: &Program) -> Result<(), EvalError> {
        debug!(statements = program.body.len(), "running program");
        let globals = self.globals.clone();
        match self.execute_statements(&program.body, &globals) {
            Ok(()) => {
                debug!("program finished");
                Ok(())
            }
            Err(action) => {
                let err = action.into_eval_error();
                debug!(error = %err, "program failed");
                Err(err)
            }
        }
    }

    /// Evaluate an expression in `env`.
    pub fn evaluate(&mut self, expr: &Expr, env: &Environment) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr(expr, env))
            .map_err(|err| err.or_span(expr.span))
    }

    /// Execute a statement in `env`.
    pub fn execute(&mut self, stmt: &Stmt, env: &Environment) -> ExecResult {
        ensure_sufficient_stack(|| self.exec_stmt(stmt, env))
    }

    /// Execute statements in order in `env`, stopping at the first
    /// error or return signal.
    pub fn execute_statements(&mut self, stmts: &[Stmt], env: &Environment) -> ExecResult {
        for stmt in stmts {
            self.execute(stmt, env)?;
        }
        Ok(())
    }

    /// Register a host function in the root environment, replacing any
    /// previous binding of the same name.
    pub fn define_native(&mut self, name: &'static str, arity: usize, func: NativeFn) {
        self.install_native(NativeFunction::new(name, arity, func));
    }

    fn install_native(&mut self, native: NativeFunction) {
        let name = self.interner.intern(native.name());
        self.globals.bind(name, Value::Native(Rc::new(native)));
    }

    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Output captured so far (empty unless printing to a buffer).
    pub fn output(&self) -> String {
        self.print_handler.get_output()
    }

    /// Current user-function call depth.
    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    /// Global lookup by source name, for hosts inspecting results.
    pub fn global(&self, name: &str) -> Option<Value> {
        self.globals.lookup(self.interner.intern(name))
    }

    fn eval_expr(&mut self, expr: &Expr, env: &Environment) -> EvalResult {
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(Value::from_literal(literal)),
            ExprKind::Array(elements) => {
                // Left to right: elements may assign.
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.evaluate(element, env)?);
                }
                Ok(Value::array(values))
            }
            ExprKind::Identifier(name) => env
                .lookup(*name)
                .ok_or_else(|| undefined_variable(self.interner.lookup(*name))),
            ExprKind::Unary { op, operand } => {
                let value = self.evaluate(operand, env)?;
                evaluate_unary(value, *op)
            }
            ExprKind::Binary { left, op, right } => {
                let left = self.evaluate(left, env)?;
                let right = self.evaluate(right, env)?;
                evaluate_binary(left, right, *op)
            }
            ExprKind::Logical { left, op, right } => {
                let left = self.evaluate(left, env)?;
                let short_circuit = match op {
                    LogicalOp::And => !left.is_truthy(),
                    LogicalOp::Or => left.is_truthy(),
                };
                if short_circuit {
                    Ok(left)
                } else {
                    self.evaluate(right, env)
                }
            }
            ExprKind::Grouping(inner) => self.evaluate(inner, env),
            ExprKind::Assign { name, value } => {
                let value = self.evaluate(value, env)?;
                env.assign(*name, value.clone())
                    .map_err(|_| undefined_variable(self.interner.lookup(*name)))?;
                Ok(value)
            }
            ExprKind::Call { callee, args } => self.eval_call(callee, args, expr.span, env),
        }
    }

    fn eval_call(
        &mut self,
        callee: &Expr,
        args: &[Expr],
        span: Span,
        env: &Environment,
    ) -> EvalResult {
        let callee = self.evaluate(callee, env)?;
        let Some(callable) = callee.as_callable() else {
            return Err(not_callable(callee.type_name()));
        };

        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(self.evaluate(arg, env)?);
        }

        if arg_values.len() != callable.arity() {
            return Err(wrong_arg_count(
                callable.name(),
                callable.arity(),
                arg_values.len(),
            ));
        }
        callable.call(self, arg_values, span)
    }

    fn exec_stmt(&mut self, stmt: &Stmt, env: &Environment) -> ExecResult {
        match &stmt.kind {
            StmtKind::Expression(expr) => {
                self.evaluate(expr, env)?;
                Ok(())
            }
            StmtKind::Print(expr) => {
                let value = self.evaluate(expr, env)?;
                self.print_handler.println(&value.to_string());
                Ok(())
            }
            StmtKind::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr, env)?,
                    None => Value::Nil,
                };
                self.define(env, *name, value, stmt.span)?;
                Ok(())
            }
            StmtKind::Block(body) => {
                let scope = env.child();
                trace!(depth = scope.depth(), "enter block");
                self.execute_statements(body, &scope)
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition, env)?.is_truthy() {
                    self.execute(then_branch, env)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch, env)
                } else {
                    Ok(())
                }
            }
            StmtKind::While { condition, body } => {
                while self.evaluate(condition, env)?.is_truthy() {
                    self.execute(body, env)?;
                }
                Ok(())
            }
            StmtKind::Function(decl) => {
                let function = LoxFunction::new(
                    Rc::clone(decl),
                    env.clone(),
                    self.interner.lookup(decl.name),
                );
                self.define(env, decl.name, Value::Function(Rc::new(function)), stmt.span)?;
                Ok(())
            }
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.evaluate(expr, env)?,
                    None => Value::Nil,
                };
                Err(ControlAction::Return(value))
            }
            StmtKind::Class(decl) => {
                let class = self.build_class(decl, env)?;
                self.define(env, decl.name, Value::Class(Rc::new(class)), stmt.span)?;
                Ok(())
            }
        }
    }

    /// Build a class object. Methods close over the declaring scope.
    fn build_class(&self, decl: &ClassDecl, env: &Environment) -> Result<LoxClass, EvalError> {
        let superclass = match decl.superclass {
            Some(name) => match env.lookup(name) {
                Some(Value::Class(class)) => Some(class),
                Some(other) => return Err(invalid_superclass(other.type_name())),
                None => return Err(undefined_variable(self.interner.lookup(name))),
            },
            None => None,
        };

        let mut methods = FxHashMap::default();
        for method in &decl.methods {
            let function = LoxFunction::new(
                Rc::clone(method),
                env.clone(),
                self.interner.lookup(method.name),
            );
            methods.insert(method.name, Rc::new(function));
        }

        Ok(LoxClass::new(
            self.interner.lookup(decl.name),
            superclass,
            methods,
        ))
    }

    /// Define `name` in `env`, reporting a redefinition in the same scope.
    fn define(
        &self,
        env: &Environment,
        name: Name,
        value: Value,
        span: Span,
    ) -> Result<(), EvalError> {
        env.define(name, value)
            .map_err(|_| redefinition(self.interner.lookup(name)).or_span(span))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
