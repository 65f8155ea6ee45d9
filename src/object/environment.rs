//! Lexically-scoped environments for variable bindings.

use super::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A lexical scope mapping names to values, with an optional enclosing scope.
///
/// Environments are shared through `Rc<RefCell<..>>`: a function literal
/// captures the environment in force at its definition site, and each
/// invocation creates a fresh environment enclosed by that captured one.
/// Parent chains are acyclic by construction since `new_enclosed` is the
/// only way to link scopes.
#[derive(Debug, Default)]
pub struct Environment {
    /// Bindings for *this* scope
    store: HashMap<String, Rc<Object>>,

    /// Optional enclosing scope
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// Create the top-level (global) environment.
    pub fn new() -> Self {
        Environment {
            store: HashMap::new(),
            outer: None,
        }
    }

    /// Create a nested environment that shares its enclosing scope.
    pub fn new_enclosed(outer: Rc<RefCell<Environment>>) -> Self {
        Environment {
            store: HashMap::new(),
            outer: Some(outer),
        }
    }

    /// Looks up a name in this scope, then walks the enclosing chain.
    pub fn get(&self, name: &str) -> Option<Rc<Object>> {
        if let Some(value) = self.store.get(name) {
            return Some(Rc::clone(value));
        }
        if let Some(outer) = &self.outer {
            return outer.borrow().get(name);
        }
        None
    }

    /// Binds a name in this scope, shadowing any outer binding.
    ///
    /// There is no assign-to-existing: `let` always defines locally.
    pub fn set(&mut self, name: String, value: Rc<Object>) {
        self.store.insert(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set() {
        let mut env = Environment::new();
        assert!(env.get("x").is_none());

        env.set("x".to_string(), Rc::new(Object::Integer(5)));
        match env.get("x").as_deref() {
            Some(Object::Integer(5)) => {}
            other => panic!("expected Integer(5), got={:?}", other),
        }
    }

    #[test]
    fn test_enclosed_lookup_walks_outer_chain() {
        let outer = Rc::new(RefCell::new(Environment::new()));
        outer
            .borrow_mut()
            .set("x".to_string(), Rc::new(Object::Integer(1)));

        let inner = Environment::new_enclosed(Rc::clone(&outer));
        match inner.get("x").as_deref() {
            Some(Object::Integer(1)) => {}
            other => panic!("expected Integer(1), got={:?}", other),
        }
    }

    #[test]
    fn test_set_shadows_outer_binding() {
        let outer = Rc::new(RefCell::new(Environment::new()));
        outer
            .borrow_mut()
            .set("x".to_string(), Rc::new(Object::Integer(1)));

        let mut inner = Environment::new_enclosed(Rc::clone(&outer));
        inner.set("x".to_string(), Rc::new(Object::Integer(2)));

        match inner.get("x").as_deref() {
            Some(Object::Integer(2)) => {}
            other => panic!("expected shadowed Integer(2), got={:?}", other),
        }
        // The outer binding is untouched
        match outer.borrow().get("x").as_deref() {
            Some(Object::Integer(1)) => {}
            other => panic!("expected outer Integer(1), got={:?}", other),
        }
    }
}
