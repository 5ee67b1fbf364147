//! Shared harness for program tests.

use lox_eval::{buffer_handler, ErrorCategory, EvalError, Interpreter};
use lox_ir::{Name, NaiveDate, Program, SharedInterner, Stmt};

/// An interpreter with buffered output and the interner its trees use.
pub struct Harness {
    interner: SharedInterner,
    interpreter: Interpreter,
}

impl Harness {
    pub fn new() -> Self {
        let interner = SharedInterner::default();
        let interpreter = Interpreter::builder()
            .interner(interner.clone())
            .print_handler(buffer_handler())
            .build();
        Harness {
            interner,
            interpreter,
        }
    }

    pub fn name(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Run the statements and return everything printed so far.
    pub fn run(&mut self, body: Vec<Stmt>) -> Result<String, EvalError> {
        self.interpreter.run(&Program::new(body))?;
        Ok(self.interpreter.output())
    }

    /// Run statements that must fail, returning the error and the output
    /// printed before the failure.
    pub fn run_err(&mut self, body: Vec<Stmt>) -> (EvalError, String) {
        let err = self.interpreter.run(&Program::new(body)).unwrap_err();
        (err, self.interpreter.output())
    }
}

/// Run a fresh program expecting success; returns the output.
pub fn run_ok(build: impl FnOnce(&Harness) -> Vec<Stmt>) -> String {
    let mut harness = Harness::new();
    let body = build(&harness);
    harness.run(body).unwrap()
}

/// Run a fresh program expecting failure; returns the error category.
pub fn run_category(build: impl FnOnce(&Harness) -> Vec<Stmt>) -> ErrorCategory {
    let mut harness = Harness::new();
    let body = build(&harness);
    harness.run_err(body).0.category()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
