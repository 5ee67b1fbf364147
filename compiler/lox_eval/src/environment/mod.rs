//! Environment for variable scoping in the interpreter.
//!
//! Scopes form a parent-linked chain. Each scope is shared through a
//! reference-counted handle because several holders can keep the same
//! scope alive at once: child scopes, the closures declared in it, and the
//! active call frame. A scope is freed when its last holder drops it.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use lox_ir::Name;

use crate::Value;

/// Error returned by [`Environment::define`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefineError {
    /// The name is already bound in this exact scope.
    AlreadyDefined,
}

/// Error returned by [`Environment::assign`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// Variable not found in any scope.
    Undefined,
}

/// A single-threaded scope wrapper for reference-counted interior mutability.
///
/// All scope allocations go through `LocalScope::new()`. The wrapper is not
/// thread-safe; the interpreter runs on one thread.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// Whether two handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A single scope containing variable bindings.
#[derive(Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Value>,
    parent: Option<Environment>,
}

/// Handle to one scope in the chain.
///
/// Cloning the handle shares the scope; it never copies bindings.
#[derive(Clone)]
pub struct Environment {
    scope: LocalScope<Scope>,
}

impl Environment {
    /// Create a root scope with no parent.
    pub fn new() -> Self {
        Environment {
            scope: LocalScope::new(Scope::default()),
        }
    }

    /// Create a fresh child scope whose parent is `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Environment {
            scope: LocalScope::new(Scope {
                bindings: FxHashMap::default(),
                parent: Some(self.clone()),
            }),
        }
    }

    pub fn parent(&self) -> Option<Environment> {
        self.scope.borrow().parent.clone()
    }

    /// Number of scopes from here to the root, inclusive.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut current = self.parent();
        while let Some(env) = current {
            depth += 1;
            current = env.parent();
        }
        depth
    }

    /// Define a new binding in this scope.
    ///
    /// Fails if this exact scope already binds `name`; bindings in parent
    /// scopes are shadowed, not redefined.
    pub fn define(&self, name: Name, value: Value) -> Result<(), DefineError> {
        let mut scope = self.scope.borrow_mut();
        if scope.bindings.contains_key(&name) {
            return Err(DefineError::AlreadyDefined);
        }
        scope.bindings.insert(name, value);
        Ok(())
    }

    /// Bind `name` in this scope, replacing any existing binding.
    ///
    /// Host registration only; program declarations go through `define`.
    pub fn bind(&self, name: Name, value: Value) -> Option<Value> {
        self.scope.borrow_mut().bindings.insert(name, value)
    }

    /// Whether this scope itself binds `name`.
    pub fn contains_local(&self, name: Name) -> bool {
        self.scope.borrow().bindings.contains_key(&name)
    }

    /// Look up a variable, walking outward through parent scopes.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        let mut current = self.clone();
        loop {
            let parent = {
                let scope = current.scope.borrow();
                if let Some(value) = scope.bindings.get(&name) {
                    return Some(value.clone());
                }
                scope.parent.clone()?
            };
            current = parent;
        }
    }

    /// Assign to an existing variable in the nearest scope that binds it.
    ///
    /// Never creates a binding.
    pub fn assign(&self, name: Name, value: Value) -> Result<(), AssignError> {
        let mut current = self.clone();
        loop {
            let parent = {
                let mut scope = current.scope.borrow_mut();
                if let Some(slot) = scope.bindings.get_mut(&name) {
                    *slot = value;
                    return Ok(());
                }
                scope.parent.clone()
            };
            match parent {
                Some(env) => current = env,
                None => return Err(AssignError::Undefined),
            }
        }
    }

    /// Whether two handles refer to the same scope.
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        self.scope.ptr_eq(&other.scope)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

// Bindings can hold closures over this scope, so only the shape is printed.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("bindings", &self.scope.borrow().bindings.len())
            .field("depth", &self.depth())
            .finish()
    }
}
