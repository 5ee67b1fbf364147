//! Callable abstraction and runtime objects.
//!
//! `Callable` is the capability the call expression checks for. It has two
//! implementers:
//! - [`NativeFunction`]: a host callback with a fixed arity, invoked with no
//!   new scope.
//! - [`LoxFunction`]: a user function closing over the environment active at
//!   its declaration.
//!
//! Classes and instances live here too since they own functions, but they
//! are not callable.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use lox_ir::{FunctionDecl, Name, Span};
use rustc_hash::FxHashMap;

use super::Value;
use crate::{Environment, EvalResult, Interpreter};

/// Something a call expression can invoke.
///
/// The caller checks `arity()` against the argument count before `call`
/// runs, so implementations may rely on `args.len() == self.arity()`.
pub trait Callable {
    /// Name used in messages and backtraces.
    fn name(&self) -> &str;

    /// Exact number of arguments accepted.
    fn arity(&self) -> usize;

    fn call(&self, interpreter: &mut Interpreter, args: Vec<Value>, call_span: Span)
        -> EvalResult;
}

/// Host callback signature.
pub type NativeFn = fn(&[Value]) -> EvalResult;

/// Host-provided function.
#[derive(Clone, Debug)]
pub struct NativeFunction {
    name: &'static str,
    arity: usize,
    func: NativeFn,
}

impl NativeFunction {
    pub const fn new(name: &'static str, arity: usize, func: NativeFn) -> Self {
        NativeFunction { name, arity, func }
    }
}

impl Callable for NativeFunction {
    fn name(&self) -> &str {
        self.name
    }

    fn arity(&self) -> usize {
        self.arity
    }

    fn call(&self, _interpreter: &mut Interpreter, args: Vec<Value>, _call_span: Span) -> EvalResult {
        (self.func)(&args)
    }
}

/// User-defined function: a declaration paired with its captured scope.
///
/// The closure is held by reference, never copied, so writes to captured
/// variables are visible to every function sharing that scope.
pub struct LoxFunction {
    decl: Rc<FunctionDecl>,
    closure: Environment,
    name: &'static str,
}

impl LoxFunction {
    pub fn new(decl: Rc<FunctionDecl>, closure: Environment, name: &'static str) -> Self {
        LoxFunction {
            decl,
            closure,
            name,
        }
    }

    pub fn decl(&self) -> &FunctionDecl {
        &self.decl
    }

    pub fn closure(&self) -> &Environment {
        &self.closure
    }
}

impl Callable for LoxFunction {
    fn name(&self) -> &str {
        self.name
    }

    fn arity(&self) -> usize {
        self.decl.arity()
    }

    fn call(&self, interpreter: &mut Interpreter, args: Vec<Value>, call_span: Span) -> EvalResult {
        interpreter.call_function(self, args, call_span)
    }
}

// The closure may contain this very function, so Debug stays shallow.
impl fmt::Debug for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoxFunction")
            .field("name", &self.name)
            .field("arity", &self.decl.arity())
            .finish_non_exhaustive()
    }
}

/// Class object: name, optional superclass, and method table.
pub struct LoxClass {
    name: &'static str,
    superclass: Option<Rc<LoxClass>>,
    methods: FxHashMap<Name, Rc<LoxFunction>>,
}

impl LoxClass {
    pub fn new(
        name: &'static str,
        superclass: Option<Rc<LoxClass>>,
        methods: FxHashMap<Name, Rc<LoxFunction>>,
    ) -> Self {
        LoxClass {
            name,
            superclass,
            methods,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn superclass(&self) -> Option<&Rc<LoxClass>> {
        self.superclass.as_ref()
    }

    /// Methods declared directly on this class.
    pub fn methods(&self) -> &FxHashMap<Name, Rc<LoxFunction>> {
        &self.methods
    }

    /// Find a method on this class or the nearest superclass defining it.
    pub fn find_method(&self, name: Name) -> Option<Rc<LoxFunction>> {
        let mut class = self;
        loop {
            if let Some(method) = class.methods.get(&name) {
                return Some(Rc::clone(method));
            }
            class = class.superclass.as_deref()?;
        }
    }
}

impl fmt::Debug for LoxClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoxClass")
            .field("name", &self.name)
            .field("superclass", &self.superclass.as_ref().map(|s| s.name))
            .field("methods", &self.methods.len())
            .finish()
    }
}

/// Instance of a class with a mutable field table.
pub struct LoxInstance {
    class: Rc<LoxClass>,
    fields: RefCell<FxHashMap<Name, Value>>,
}

impl LoxInstance {
    pub fn new(class: Rc<LoxClass>) -> Self {
        LoxInstance {
            class,
            fields: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn class(&self) -> &Rc<LoxClass> {
        &self.class
    }

    /// Field value, falling back to a method from the class chain.
    pub fn get(&self, name: Name) -> Option<Value> {
        if let Some(value) = self.fields.borrow().get(&name) {
            return Some(value.clone());
        }
        self.class.find_method(name).map(Value::Function)
    }

    /// Set a field, returning the previous value.
    pub fn set(&self, name: Name, value: Value) -> Option<Value> {
        self.fields.borrow_mut().insert(name, value)
    }
}

// Fields may refer back to this instance.
impl fmt::Debug for LoxInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoxInstance")
            .field("class", &self.class.name)
            .field("fields", &self.fields.borrow().len())
            .finish()
    }
}
