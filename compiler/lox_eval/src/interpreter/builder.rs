//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use super::Interpreter;
use crate::diagnostics::CallStack;
use crate::natives::PRELUDE;
use crate::{stdout_handler, Environment, SharedPrintHandler};
use lox_ir::SharedInterner;

/// Call depth allowed when the host does not pick one.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;

/// Builder for creating Interpreter instances.
///
/// Defaults: a fresh interner, stdout output, the native prelude, and a
/// call depth limit of [`DEFAULT_MAX_CALL_DEPTH`].
pub struct InterpreterBuilder {
    interner: Option<SharedInterner>,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: Option<usize>,
    prelude: bool,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            interner: None,
            print_handler: None,
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
            prelude: true,
        }
    }

    /// Share an interner with whoever built the program's names.
    ///
    /// Names in the tree must come from this interner, otherwise identifiers
    /// and error messages will not line up.
    #[must_use]
    pub fn interner(mut self, interner: SharedInterner) -> Self {
        self.interner = Some(interner);
        self
    }

    /// Set where `print` output goes. Default is stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set the user-function call depth limit. `None` removes the limit.
    #[must_use]
    pub fn max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Whether to install the native prelude (`clock`).
    #[must_use]
    pub fn with_prelude(mut self, prelude: bool) -> Self {
        self.prelude = prelude;
        self
    }

    /// Build the interpreter.
    pub fn build(self) -> Interpreter {
        let mut interpreter = Interpreter {
            interner: self.interner.unwrap_or_default(),
            globals: Environment::new(),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            call_stack: CallStack::new(self.max_call_depth),
        };

        if self.prelude {
            for native in PRELUDE {
                interpreter.install_native(native.clone());
            }
        }

        interpreter
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
