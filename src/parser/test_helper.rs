//! This module contains helper functions for testing the parser.
//! It makes easier to test the parser.

use crate::Parser;
use crate::ast::{Expression, Node, Statement};

/// Expected literal values for table-driven expression tests.
#[derive(Debug, Clone, Copy)]
pub enum Expected {
    Int(i64),
    Ident(&'static str),
    Bool(bool),
}

/// Panics with all collected parser errors if parsing produced any.
#[track_caller]
pub fn check_parser_errors(p: &Parser) {
    if p.errors.is_empty() {
        return;
    }
    let mut message = format!("parser has {} errors", p.errors.len());
    for error in p.errors.iter() {
        message.push_str(&format!("\nparser error: {}", error));
    }
    panic!("{}", message);
}

/// Helper function to test a single let statement.
///
/// This function validates that a statement is a `LetStatement` and that
/// its identifier matches the expected name.
///
/// # Parameters
/// - `s`: A reference to a Statement enum to test
/// - `name`: The expected identifier name (e.g., "x", "y", "foobar")
#[track_caller]
pub fn test_let_statement(s: &Statement, name: &str) -> bool {
    if s.token_literal() != "let" {
        panic!("s.token_literal not 'let'. got={}", s.token_literal());
    }
    let let_stmt = match s {
        Statement::Let(stmt) => stmt,
        _ => panic!("s not LetStatement. got={:?}", s),
    };
    if let_stmt.name.value != name {
        panic!(
            "let_stmt.name.value not '{}'. got={}",
            name, let_stmt.name.value
        );
    }
    if let_stmt.name.token_literal() != name {
        panic!(
            "let_stmt.name.token_literal() not '{}'. got={}",
            name,
            let_stmt.name.token_literal()
        );
    }
    true
}

/// Its a helper function which tests an integer literal expression.
///
/// # Parameters
/// - `exp`: The expression to test
/// - `value`: The expected value of the integer literal
#[track_caller]
pub fn test_integer_literal(exp: &Expression, value: i64) -> bool {
    let int_lit = match exp {
        Expression::IntegerLiteral(il) => il,
        _ => panic!("exp not IntegerLiteral. got={:?}", exp),
    };

    if int_lit.value != value {
        panic!("integ.value not {}. got={}", value, int_lit.value);
    }

    let expected_token_literal = value.to_string();
    if int_lit.token_literal() != expected_token_literal {
        panic!(
            "integ.token_literal not {}. got='{}'",
            value,
            int_lit.token_literal()
        );
    }

    true
}

/// Tests an identifier expression against the expected name.
#[track_caller]
pub fn test_identifier(exp: &Expression, value: &str) -> bool {
    let ident = match exp {
        Expression::Identifier(ident) => ident,
        _ => panic!("exp not Identifier. got={:?}", exp),
    };

    if ident.value != value {
        panic!("ident.value not {}. got={}", value, ident.value);
    }
    if ident.token_literal() != value {
        panic!(
            "ident.token_literal not {}. got={}",
            value,
            ident.token_literal()
        );
    }
    true
}

/// Tests a boolean literal expression against the expected value.
#[track_caller]
pub fn test_boolean_literal(exp: &Expression, value: bool) -> bool {
    let boolean = match exp {
        Expression::BooleanLiteral(b) => b,
        _ => panic!("exp not BooleanLiteral. got={:?}", exp),
    };

    if boolean.value != value {
        panic!("boolean.value not {}. got={}", value, boolean.value);
    }
    if boolean.token_literal() != value.to_string() {
        panic!(
            "boolean.token_literal not {}. got={}",
            value,
            boolean.token_literal()
        );
    }
    true
}

/// Dispatches to the right literal test based on the expected value.
#[track_caller]
pub fn test_literal_expression(exp: &Expression, expected: &Expected) -> bool {
    match expected {
        Expected::Int(value) => test_integer_literal(exp, *value),
        Expected::Ident(value) => test_identifier(exp, value),
        Expected::Bool(value) => test_boolean_literal(exp, *value),
    }
}

/// Tests an infix expression's operand values and operator.
#[track_caller]
pub fn test_infix_expression(
    exp: &Expression,
    left: &Expected,
    operator: &str,
    right: &Expected,
) -> bool {
    let infix = match exp {
        Expression::InfixExpression(infix) => infix,
        _ => panic!("exp not InfixExpression. got={:?}", exp),
    };

    test_literal_expression(&infix.left, left);
    if infix.operator != operator {
        panic!("infix.operator is not '{}'. got={}", operator, infix.operator);
    }
    test_literal_expression(&infix.right, right);
    true
}
