//! Built-in functions available to every program.
//!
//! The table is consulted only after identifier lookup misses the whole
//! environment chain, so user bindings can shadow built-ins.

use super::Evaluator;
use crate::object::{BuiltinFunction, Object};
use std::collections::HashMap;
use std::rc::Rc;

/// Builds the built-ins table. Called once when an evaluator is created;
/// each entry is a single shared object so repeated lookups hand out the
/// same reference.
pub(super) fn builtins() -> HashMap<&'static str, Rc<Object>> {
    let mut table: HashMap<&'static str, Rc<Object>> = HashMap::new();
    table.insert("len", Rc::new(Object::Builtin(builtin_len as BuiltinFunction)));
    table.insert(
        "push",
        Rc::new(Object::Builtin(builtin_push as BuiltinFunction)),
    );
    table.insert(
        "puts",
        Rc::new(Object::Builtin(builtin_puts as BuiltinFunction)),
    );
    table
}

/// `len(x)`: byte length of a string or element count of an array.
fn builtin_len(_evaluator: &Evaluator, args: &[Rc<Object>]) -> Rc<Object> {
    if args.len() != 1 {
        return Evaluator::new_error(format!(
            "wrong number of arguments. got={}, want=1",
            args.len()
        ));
    }
    match &*args[0] {
        Object::String(value) => Rc::new(Object::Integer(value.len() as i64)),
        Object::Array(elements) => Rc::new(Object::Integer(elements.borrow().len() as i64)),
        _ => Evaluator::new_error(format!(
            "argument to `len` not supported, got {}",
            args[0].type_name()
        )),
    }
}

/// `push(arr, v)`: appends to the argument array in place and returns the
/// same array reference rather than a copy.
fn builtin_push(_evaluator: &Evaluator, args: &[Rc<Object>]) -> Rc<Object> {
    if args.len() != 2 {
        return Evaluator::new_error(format!(
            "wrong number of arguments. got={}, want=2",
            args.len()
        ));
    }
    match &*args[0] {
        Object::Array(elements) => {
            elements.borrow_mut().push(Rc::clone(&args[1]));
            Rc::clone(&args[0])
        }
        _ => Evaluator::new_error(format!(
            "argument to `push` must be ARRAY, got {}",
            args[0].type_name()
        )),
    }
}

/// `puts(...)`: prints each argument's inspect form on its own line and
/// returns null.
fn builtin_puts(evaluator: &Evaluator, args: &[Rc<Object>]) -> Rc<Object> {
    for arg in args {
        println!("{}", arg);
    }
    evaluator.null()
}
