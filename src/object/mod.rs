//! Runtime values for the Monkey evaluator.
//!
//! Values are a tagged union handled through shared `Rc<Object>` references.
//! The evaluator hands out clones of canonical `true`/`false`/`null` handles,
//! so `==`/`!=` on non-integer operands can compare by reference identity the
//! way the language defines it. A quirk that falls out of identity equality
//! and is preserved deliberately: two separately-evaluated string literals
//! never compare equal (`"a" == "a"` is `false`), while a bound name compares
//! equal to itself.
//!
//! `ReturnValue` and `Error` are transient sentinels used to unwind
//! evaluation; they never end up inside arrays, hashes, or environments.

pub mod environment;

pub use environment::Environment;

use crate::ast::expression::{BlockStatement, Identifier};
use crate::evaluator::Evaluator;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::rc::Rc;

/// The signature of a native built-in function.
///
/// Built-ins receive the evaluator so they can hand back its canonical
/// singletons (e.g. `puts` returning null).
pub type BuiltinFunction = fn(&Evaluator, &[Rc<Object>]) -> Rc<Object>;

/// A runtime value produced by evaluation.
#[derive(Debug)]
pub enum Object {
    Integer(i64),
    String(String),
    Boolean(bool),
    Null,
    /// Wraps a value unwinding out of nested blocks toward the nearest
    /// function-call or program boundary.
    ReturnValue(Rc<Object>),
    /// A runtime error; propagates exactly like `ReturnValue`.
    Error(String),
    Function(Function),
    Builtin(BuiltinFunction),
    /// Elements sit behind a `RefCell` because `push` appends to its
    /// argument array in place and returns the same reference.
    Array(RefCell<Vec<Rc<Object>>>),
    Hash(HashMap<HashKey, HashPair>),
}

/// A user-defined function value: parameters, body, and the environment
/// captured at the definition site (the closure's scope).
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
    pub env: Rc<RefCell<Environment>>,
}

impl fmt::Debug for Function {
    // The captured environment is omitted: a function stored in its own
    // scope would make the derived impl recurse forever.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &format_args!("{}", self.body))
            .finish_non_exhaustive()
    }
}

/// A key-value slot in a hash; the original key object is kept so the hash
/// can be inspected.
#[derive(Debug)]
pub struct HashPair {
    pub key: Rc<Object>,
    pub value: Rc<Object>,
}

/// The type of value a `HashKey` was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashKeyKind {
    Integer,
    Boolean,
    String,
}

/// A hash-map key derived from a hashable object.
///
/// Two objects produce the same `HashKey` iff they would compare `==` in the
/// source language: booleans map to 0/1, integers to their two's-complement
/// bits, strings to their FNV-1a 64-bit hash. Only integers, booleans, and
/// strings are hashable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub kind: HashKeyKind,
    pub value: u64,
}

impl Object {
    /// Returns the type tag used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::String(_) => "STRING",
            Object::Boolean(_) => "BOOLEAN",
            Object::Null => "NULL",
            Object::ReturnValue(_) => "RETURN_VALUE",
            Object::Error(_) => "ERROR",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
        }
    }

    /// True if this object is the error sentinel.
    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// Computes the hash key for a hashable object.
    ///
    /// Returns `None` for types that cannot be used as hash keys.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(value) => Some(HashKey {
                kind: HashKeyKind::Integer,
                value: *value as u64,
            }),
            Object::Boolean(value) => Some(HashKey {
                kind: HashKeyKind::Boolean,
                value: *value as u64,
            }),
            Object::String(value) => Some(HashKey {
                kind: HashKeyKind::String,
                value: fnv1a_64(value),
            }),
            _ => None,
        }
    }
}

impl Display for Object {
    /// Formats the object in its `Inspect` form, the exact text the REPL
    /// prints.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::String(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::Null => write!(f, "null"),
            Object::ReturnValue(value) => write!(f, "{}", value),
            Object::Error(message) => write!(f, "ERROR: {}", message),
            Object::Function(function) => {
                let params: Vec<String> =
                    function.parameters.iter().map(|p| p.to_string()).collect();
                write!(f, "fn({}) {{\n{}\n}}", params.join(", "), function.body)
            }
            Object::Builtin(_) => write!(f, "builtin function"),
            Object::Array(elements) => {
                let elements: Vec<String> = elements
                    .borrow()
                    .iter()
                    .map(|e| e.to_string())
                    .collect();
                write!(f, "[{}]", elements.join(", "))
            }
            Object::Hash(pairs) => {
                let pairs: Vec<String> = pairs
                    .values()
                    .map(|pair| format!("{}: {}", pair.key, pair.value))
                    .collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
        }
    }
}

/// FNV-1a 64-bit hash.
///
/// Used instead of the standard library's hasher so hash keys for strings are
/// portable and testable across hosts.
fn fnv1a_64(input: &str) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    let mut hash = OFFSET_BASIS;
    for byte in input.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}
