//! User-function call evaluation.

use lox_ir::Span;
use tracing::trace;

use super::Interpreter;
use crate::diagnostics::CallFrame;
use crate::errors::{redefinition, ControlAction, EvalResult};
use crate::{Callable, LoxFunction, Value};

impl Interpreter {
    /// Call a user function with already-evaluated arguments.
    ///
    /// The arity has been checked by the caller. The body runs in a fresh
    /// scope whose parent is the function's closure. This is the only place
    /// a `Return` signal is turned back into a value.
    pub(crate) fn call_function(
        &mut self,
        func: &LoxFunction,
        args: Vec<Value>,
        call_span: Span,
    ) -> EvalResult {
        let decl = func.decl();
        self.call_stack.push(CallFrame {
            name: decl.name,
            call_span: (call_span != Span::DUMMY).then_some(call_span),
        })?;
        trace!(
            function = func.name(),
            arity = decl.arity(),
            depth = self.call_stack.depth(),
            "call"
        );

        let result = self.run_body(func, args);
        let result = result.map_err(|err| self.call_stack.attach_backtrace(err, &self.interner));

        self.call_stack.pop();
        result
    }

    fn run_body(&mut self, func: &LoxFunction, args: Vec<Value>) -> EvalResult {
        let decl = func.decl();
        let scope = func.closure().child();
        for (param, arg) in decl.params.iter().zip(args) {
            scope
                .define(*param, arg)
                .map_err(|_| redefinition(self.interner.lookup(*param)))?;
        }

        match self.execute_statements(&decl.body, &scope) {
            Ok(()) => Ok(Value::Nil),
            Err(ControlAction::Return(value)) => Ok(value),
            Err(ControlAction::Error(err)) => Err(err),
        }
    }
}
