//! Tree-walking evaluator for the Monkey language.
//!
//! Evaluation walks the AST depth-first, left to right, producing shared
//! `Rc<Object>` values inside lexically-scoped environments. Two sentinel
//! values drive unwinding instead of host exceptions: `ReturnValue` carries a
//! `return` out of nested blocks until a function-call or program boundary
//! unwraps it, and `Error` propagates the same way but is never unwrapped.
//! Block evaluation returns both sentinels still wrapped; only
//! `eval_program` and function application unwrap `ReturnValue`. That
//! difference is what makes a `return` inside nested blocks terminate the
//! whole function rather than just the innermost block.

mod builtins;

use crate::ast::{
    Program,
    expression::{
        BlockStatement, Expression, HashLiteral, Identifier, IfExpression,
    },
    statement::Statement,
};
use crate::object::{Environment, Function, HashKey, HashPair, Object};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Walks the AST producing runtime values.
///
/// The evaluator owns the canonical `true`/`false`/`null` singletons and the
/// built-ins table; both are created once and immutable afterwards. All
/// booleans and nulls an evaluation produces are clones of the singleton
/// handles, which is what makes identity comparison in `==`/`!=` correct.
pub struct Evaluator {
    true_obj: Rc<Object>,
    false_obj: Rc<Object>,
    null_obj: Rc<Object>,
    builtins: HashMap<&'static str, Rc<Object>>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Creates an evaluator with fresh singletons and the built-ins table.
    pub fn new() -> Self {
        Evaluator {
            true_obj: Rc::new(Object::Boolean(true)),
            false_obj: Rc::new(Object::Boolean(false)),
            null_obj: Rc::new(Object::Null),
            builtins: builtins::builtins(),
        }
    }

    /// Returns a handle to the canonical null singleton.
    pub fn null(&self) -> Rc<Object> {
        Rc::clone(&self.null_obj)
    }

    /// Wraps a message in the error sentinel.
    pub(crate) fn new_error(message: String) -> Rc<Object> {
        Rc::new(Object::Error(message))
    }

    /// Evaluates a program in the given environment.
    ///
    /// Statements run in order. A `ReturnValue` result is unwrapped and
    /// terminates the program; an `Error` terminates it as-is. Otherwise the
    /// last statement's value is the program's value (null for an empty
    /// program).
    pub fn eval_program(&self, program: &Program, env: &Rc<RefCell<Environment>>) -> Rc<Object> {
        log::trace!("Evaluating program with {} statements", program.statements.len());
        let mut result = Rc::clone(&self.null_obj);
        for statement in &program.statements {
            result = self.eval_statement(statement, env);
            if let Object::ReturnValue(value) = &*result {
                return Rc::clone(value);
            }
            if result.is_error() {
                return result;
            }
        }
        result
    }

    fn eval_statement(&self, statement: &Statement, env: &Rc<RefCell<Environment>>) -> Rc<Object> {
        match statement {
            Statement::Let(stmt) => {
                let value = self.eval_expression(&stmt.value, env);
                if value.is_error() {
                    return value;
                }
                env.borrow_mut().set(stmt.name.value.clone(), value);
                Rc::clone(&self.null_obj)
            }
            Statement::Return(stmt) => {
                let value = self.eval_expression(&stmt.value, env);
                if value.is_error() {
                    return value;
                }
                Rc::new(Object::ReturnValue(value))
            }
            Statement::Expression(stmt) => self.eval_expression(&stmt.value, env),
        }
    }

    /// Evaluates the statements of a block in order.
    ///
    /// Unlike `eval_program`, `ReturnValue` and `Error` results are returned
    /// still wrapped so they keep unwinding through enclosing blocks.
    fn eval_block_statement(
        &self,
        block: &BlockStatement,
        env: &Rc<RefCell<Environment>>,
    ) -> Rc<Object> {
        let mut result = Rc::clone(&self.null_obj);
        for statement in &block.statements {
            result = self.eval_statement(statement, env);
            if matches!(&*result, Object::ReturnValue(_) | Object::Error(_)) {
                return result;
            }
        }
        result
    }

    fn eval_expression(
        &self,
        expression: &Expression,
        env: &Rc<RefCell<Environment>>,
    ) -> Rc<Object> {
        match expression {
            Expression::IntegerLiteral(lit) => Rc::new(Object::Integer(lit.value)),
            Expression::StringLiteral(lit) => Rc::new(Object::String(lit.value.clone())),
            Expression::BooleanLiteral(lit) => self.native_bool_to_boolean_object(lit.value),
            Expression::Identifier(ident) => self.eval_identifier(ident, env),
            Expression::PrefixExpression(prefix) => {
                let right = self.eval_expression(&prefix.right, env);
                if right.is_error() {
                    return right;
                }
                self.eval_prefix_expression(&prefix.operator, right)
            }
            Expression::InfixExpression(infix) => {
                let left = self.eval_expression(&infix.left, env);
                if left.is_error() {
                    return left;
                }
                let right = self.eval_expression(&infix.right, env);
                if right.is_error() {
                    return right;
                }
                self.eval_infix_expression(&infix.operator, left, right)
            }
            Expression::IfExpression(ie) => self.eval_if_expression(ie, env),
            Expression::FunctionLiteral(lit) => Rc::new(Object::Function(Function {
                parameters: lit.parameters.clone(),
                body: lit.body.clone(),
                env: Rc::clone(env),
            })),
            Expression::CallExpression(call) => {
                let function = self.eval_expression(&call.function, env);
                if function.is_error() {
                    return function;
                }
                let args = self.eval_expressions(&call.arguments, env);
                if args.len() == 1 && args[0].is_error() {
                    return Rc::clone(&args[0]);
                }
                self.apply_function(function, &args)
            }
            Expression::ArrayLiteral(lit) => {
                let elements = self.eval_expressions(&lit.elements, env);
                if elements.len() == 1 && elements[0].is_error() {
                    return Rc::clone(&elements[0]);
                }
                Rc::new(Object::Array(RefCell::new(elements)))
            }
            Expression::IndexExpression(ie) => {
                let left = self.eval_expression(&ie.left, env);
                if left.is_error() {
                    return left;
                }
                let index = self.eval_expression(&ie.index, env);
                if index.is_error() {
                    return index;
                }
                self.eval_index_expression(left, index)
            }
            Expression::HashLiteral(lit) => self.eval_hash_literal(lit, env),
        }
    }

    fn eval_prefix_expression(&self, operator: &str, right: Rc<Object>) -> Rc<Object> {
        match operator {
            "!" => self.eval_bang_operator_expression(right),
            "-" => self.eval_minus_prefix_operator_expression(right),
            _ => Self::new_error(format!(
                "unknown operator: {}{}",
                operator,
                right.type_name()
            )),
        }
    }

    /// `!x` negates truthiness: false and null are the only falsy values.
    fn eval_bang_operator_expression(&self, right: Rc<Object>) -> Rc<Object> {
        match &*right {
            Object::Boolean(true) => Rc::clone(&self.false_obj),
            Object::Boolean(false) => Rc::clone(&self.true_obj),
            Object::Null => Rc::clone(&self.true_obj),
            _ => Rc::clone(&self.false_obj),
        }
    }

    fn eval_minus_prefix_operator_expression(&self, right: Rc<Object>) -> Rc<Object> {
        match &*right {
            Object::Integer(value) => Rc::new(Object::Integer(value.wrapping_neg())),
            _ => Self::new_error(format!("unknown operator: -{}", right.type_name())),
        }
    }

    /// Dispatches an infix operator over evaluated operands.
    ///
    /// Integer pairs use the arithmetic/comparison table and string pairs
    /// support concatenation; everything else falls through to identity
    /// comparison for `==`/`!=`, then to the type-mismatch and
    /// unknown-operator errors.
    fn eval_infix_expression(
        &self,
        operator: &str,
        left: Rc<Object>,
        right: Rc<Object>,
    ) -> Rc<Object> {
        match (&*left, &*right) {
            (Object::Integer(l), Object::Integer(r)) => {
                self.eval_integer_infix_expression(operator, *l, *r)
            }
            (Object::String(l), Object::String(r)) => {
                self.eval_string_infix_expression(operator, l, r)
            }
            _ if operator == "==" => {
                self.native_bool_to_boolean_object(Rc::ptr_eq(&left, &right))
            }
            _ if operator == "!=" => {
                self.native_bool_to_boolean_object(!Rc::ptr_eq(&left, &right))
            }
            _ if left.type_name() != right.type_name() => Self::new_error(format!(
                "type mismatch: {} {} {}",
                left.type_name(),
                operator,
                right.type_name()
            )),
            _ => Self::new_error(format!(
                "unknown operator: {} {} {}",
                left.type_name(),
                operator,
                right.type_name()
            )),
        }
    }

    /// Integer arithmetic wraps in 64-bit two's complement; division
    /// truncates toward zero and division by zero is a runtime error.
    fn eval_integer_infix_expression(&self, operator: &str, left: i64, right: i64) -> Rc<Object> {
        match operator {
            "+" => Rc::new(Object::Integer(left.wrapping_add(right))),
            "-" => Rc::new(Object::Integer(left.wrapping_sub(right))),
            "*" => Rc::new(Object::Integer(left.wrapping_mul(right))),
            "/" => {
                if right == 0 {
                    Self::new_error("division by zero".to_string())
                } else {
                    Rc::new(Object::Integer(left.wrapping_div(right)))
                }
            }
            "<" => self.native_bool_to_boolean_object(left < right),
            ">" => self.native_bool_to_boolean_object(left > right),
            "==" => self.native_bool_to_boolean_object(left == right),
            "!=" => self.native_bool_to_boolean_object(left != right),
            _ => Self::new_error(format!("unknown operator: INTEGER {} INTEGER", operator)),
        }
    }

    fn eval_string_infix_expression(&self, operator: &str, left: &str, right: &str) -> Rc<Object> {
        match operator {
            "+" => Rc::new(Object::String(format!("{}{}", left, right))),
            _ => Self::new_error(format!("unknown operator: STRING {} STRING", operator)),
        }
    }

    fn eval_if_expression(
        &self,
        ie: &IfExpression,
        env: &Rc<RefCell<Environment>>,
    ) -> Rc<Object> {
        let condition = self.eval_expression(&ie.condition, env);
        if condition.is_error() {
            return condition;
        }
        if Self::is_truthy(&condition) {
            self.eval_block_statement(&ie.consequence, env)
        } else if let Some(alternative) = &ie.alternative {
            self.eval_block_statement(alternative, env)
        } else {
            Rc::clone(&self.null_obj)
        }
    }

    /// Resolves a name against the environment chain, falling back to the
    /// built-ins table.
    fn eval_identifier(
        &self,
        ident: &Identifier,
        env: &Rc<RefCell<Environment>>,
    ) -> Rc<Object> {
        if let Some(value) = env.borrow().get(&ident.value) {
            return value;
        }
        if let Some(builtin) = self.builtins.get(ident.value.as_str()) {
            return Rc::clone(builtin);
        }
        Self::new_error(format!("identifier not found: {}", ident.value))
    }

    /// Evaluates expressions left to right.
    ///
    /// On the first error, returns a one-element list holding just that
    /// error; callers check for that shape and propagate.
    fn eval_expressions(
        &self,
        expressions: &[Expression],
        env: &Rc<RefCell<Environment>>,
    ) -> Vec<Rc<Object>> {
        let mut result = Vec::with_capacity(expressions.len());
        for expression in expressions {
            let evaluated = self.eval_expression(expression, env);
            if evaluated.is_error() {
                return vec![evaluated];
            }
            result.push(evaluated);
        }
        result
    }

    /// Calls a function or built-in with already-evaluated arguments.
    ///
    /// User functions get a fresh environment enclosed by their captured
    /// scope, with parameters bound positionally. Arity is not checked:
    /// missing arguments leave parameters unbound (surfacing later as
    /// `identifier not found`), extra arguments are ignored.
    fn apply_function(&self, function: Rc<Object>, args: &[Rc<Object>]) -> Rc<Object> {
        match &*function {
            Object::Function(func) => {
                log::trace!(
                    "Applying function with {} parameters, {} arguments",
                    func.parameters.len(),
                    args.len()
                );
                let mut extended = Environment::new_enclosed(Rc::clone(&func.env));
                for (i, param) in func.parameters.iter().enumerate() {
                    if let Some(arg) = args.get(i) {
                        extended.set(param.value.clone(), Rc::clone(arg));
                    }
                }
                let extended = Rc::new(RefCell::new(extended));
                let evaluated = self.eval_block_statement(&func.body, &extended);
                Self::unwrap_return_value(evaluated)
            }
            Object::Builtin(builtin) => builtin(self, args),
            _ => Self::new_error(format!("not a function: {}", function.type_name())),
        }
    }

    fn unwrap_return_value(obj: Rc<Object>) -> Rc<Object> {
        if let Object::ReturnValue(value) = &*obj {
            return Rc::clone(value);
        }
        obj
    }

    fn eval_index_expression(&self, left: Rc<Object>, index: Rc<Object>) -> Rc<Object> {
        match (&*left, &*index) {
            (Object::Array(elements), Object::Integer(i)) => {
                self.eval_array_index_expression(&elements.borrow(), *i)
            }
            (Object::Hash(pairs), _) => self.eval_hash_index_expression(pairs, &index),
            _ => Self::new_error(format!(
                "index operator not supported: {}",
                left.type_name()
            )),
        }
    }

    /// Out-of-range indices (including negative ones) yield null, never an
    /// error.
    fn eval_array_index_expression(&self, elements: &[Rc<Object>], index: i64) -> Rc<Object> {
        let max = elements.len() as i64 - 1;
        if index < 0 || index > max {
            return Rc::clone(&self.null_obj);
        }
        Rc::clone(&elements[index as usize])
    }

    /// A missing key yields null; an unhashable index is an error.
    fn eval_hash_index_expression(
        &self,
        pairs: &HashMap<HashKey, HashPair>,
        index: &Rc<Object>,
    ) -> Rc<Object> {
        match index.hash_key() {
            Some(key) => match pairs.get(&key) {
                Some(pair) => Rc::clone(&pair.value),
                None => Rc::clone(&self.null_obj),
            },
            None => Self::new_error(format!("unusable as hash key: {}", index.type_name())),
        }
    }

    /// Evaluates hash pairs in source order, key before value; duplicate
    /// keys are resolved last-write-wins.
    fn eval_hash_literal(
        &self,
        node: &HashLiteral,
        env: &Rc<RefCell<Environment>>,
    ) -> Rc<Object> {
        let mut pairs = HashMap::new();
        for (key_expression, value_expression) in &node.pairs {
            let key = self.eval_expression(key_expression, env);
            if key.is_error() {
                return key;
            }
            let Some(hash_key) = key.hash_key() else {
                return Self::new_error(format!("unusable as hash key: {}", key.type_name()));
            };
            let value = self.eval_expression(value_expression, env);
            if value.is_error() {
                return value;
            }
            pairs.insert(hash_key, HashPair { key, value });
        }
        Rc::new(Object::Hash(pairs))
    }

    fn native_bool_to_boolean_object(&self, input: bool) -> Rc<Object> {
        if input {
            Rc::clone(&self.true_obj)
        } else {
            Rc::clone(&self.false_obj)
        }
    }

    /// Everything is truthy except false and null; 0, "" and empty
    /// composites are all true.
    fn is_truthy(obj: &Rc<Object>) -> bool {
        match &**obj {
            Object::Null => false,
            Object::Boolean(value) => *value,
            _ => true,
        }
    }
}
