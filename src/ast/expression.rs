//! Expression types in the Monkey language AST.
//!
//! Expressions represent values and computations that evaluate to a value.
//! Each variant wraps a specific expression node. Prefix and infix
//! expressions render fully parenthesized so operator-precedence tests can
//! assert on the program's string form.

use super::Node;
use super::statement::Statement;
use crate::lexer::token::Token;
use std::fmt::{Display, Formatter, Result};

/// Enum representing all expression types in the AST.
#[derive(Debug, Clone)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral(IntegerLiteral),
    StringLiteral(StringLiteral),
    BooleanLiteral(BooleanLiteral),
    PrefixExpression(PrefixExpression),
    InfixExpression(InfixExpression),
    IfExpression(IfExpression),
    FunctionLiteral(FunctionLiteral),
    CallExpression(CallExpression),
    ArrayLiteral(ArrayLiteral),
    IndexExpression(IndexExpression),
    HashLiteral(HashLiteral),
}

impl Node for Expression {
    fn token_literal(&self) -> &str {
        match self {
            Expression::Identifier(e) => e.token_literal(),
            Expression::IntegerLiteral(e) => e.token_literal(),
            Expression::StringLiteral(e) => e.token_literal(),
            Expression::BooleanLiteral(e) => e.token_literal(),
            Expression::PrefixExpression(e) => e.token_literal(),
            Expression::InfixExpression(e) => e.token_literal(),
            Expression::IfExpression(e) => e.token_literal(),
            Expression::FunctionLiteral(e) => e.token_literal(),
            Expression::CallExpression(e) => e.token_literal(),
            Expression::ArrayLiteral(e) => e.token_literal(),
            Expression::IndexExpression(e) => e.token_literal(),
            Expression::HashLiteral(e) => e.token_literal(),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Expression::Identifier(e) => write!(f, "{}", e),
            Expression::IntegerLiteral(e) => write!(f, "{}", e),
            Expression::StringLiteral(e) => write!(f, "{}", e),
            Expression::BooleanLiteral(e) => write!(f, "{}", e),
            Expression::PrefixExpression(e) => write!(f, "{}", e),
            Expression::InfixExpression(e) => write!(f, "{}", e),
            Expression::IfExpression(e) => write!(f, "{}", e),
            Expression::FunctionLiteral(e) => write!(f, "{}", e),
            Expression::CallExpression(e) => write!(f, "{}", e),
            Expression::ArrayLiteral(e) => write!(f, "{}", e),
            Expression::IndexExpression(e) => write!(f, "{}", e),
            Expression::HashLiteral(e) => write!(f, "{}", e),
        }
    }
}

/// Represents an identifier expression in the Monkey language AST.
///
/// An identifier is a name that refers to a variable, function, or other
/// named entity. It consists of the token that represents it and its string
/// value.
#[derive(Debug, Clone)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl Node for Identifier {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.value)
    }
}

/// An integer literal such as `5`. The value is parsed as a signed 64-bit
/// integer at parse time.
#[derive(Debug, Clone)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

impl Node for IntegerLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for IntegerLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.token.literal)
    }
}

/// A string literal such as `"hello"`. The value is the raw contents between
/// the quotes; there are no escape sequences.
#[derive(Debug, Clone)]
pub struct StringLiteral {
    pub token: Token,
    pub value: String,
}

impl Node for StringLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for StringLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.token.literal)
    }
}

/// A boolean literal: `true` or `false`.
#[derive(Debug, Clone)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

impl Node for BooleanLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for BooleanLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.token.literal)
    }
}

/// Represents a prefix expression in the Monkey language AST.
///
/// A prefix expression consists of a prefix operator (like `!` or `-`)
/// followed by an expression. Examples include `!true`, `-5`, `!x`.
#[derive(Debug, Clone)]
pub struct PrefixExpression {
    /// The token representing the prefix operator (e.g., BANG, MINUS)
    pub token: Token,
    /// The string representation of the operator (e.g., "!", "-")
    pub operator: String,
    /// The expression that the operator is applied to
    pub right: Box<Expression>,
}

impl Node for PrefixExpression {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for PrefixExpression {
    /// Formats the prefix expression as `(operator right)`.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({}{})", self.operator, self.right)
    }
}

/// Represents an infix expression in the Monkey language AST.
///
/// An infix expression consists of a left expression, an infix operator
/// (like `+`, `-`, `*`, `/`, `==`, `!=`, `<`, `>`), and a right expression.
/// Examples include `5 + 3`, `x == y`, `a < b`.
#[derive(Debug, Clone)]
pub struct InfixExpression {
    /// The token representing the infix operator (e.g., PLUS, MINUS, EQ, NOTEQ)
    pub token: Token,
    /// The left-hand side expression
    pub left: Box<Expression>,
    /// The string representation of the operator (e.g., "+", "-", "==", "!=")
    pub operator: String,
    /// The right-hand side expression
    pub right: Box<Expression>,
}

impl Node for InfixExpression {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for InfixExpression {
    /// Formats the infix expression as `(left operator right)`.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

/// A braced sequence of statements, used as the body of functions and the
/// branches of `if` expressions. Blocks never appear at the top level; a `{`
/// in expression position starts a hash literal instead.
#[derive(Debug, Clone)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
}

impl Node for BlockStatement {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

/// An `if` expression: `if (<condition>) <consequence> else <alternative>`.
///
/// `if` is an expression, not a statement: it produces the value of the
/// branch that was taken (or null when the condition is falsy and there is
/// no alternative).
#[derive(Debug, Clone)]
pub struct IfExpression {
    pub token: Token,
    pub condition: Box<Expression>,
    pub consequence: BlockStatement,
    pub alternative: Option<BlockStatement>,
}

impl Node for IfExpression {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for IfExpression {
    /// Formats the expression as `if (<condition>) { <consequence> }`,
    /// followed by ` else { <alternative> }` when present. The condition is
    /// parenthesized and the branches braced, so the printed form parses
    /// back to the same tree.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "if ({}) {{ {} }}", self.condition, self.consequence)?;
        if let Some(alternative) = &self.alternative {
            write!(f, " else {{ {} }}", alternative)?;
        }
        Ok(())
    }
}

/// A function literal: `fn(<parameters>) <body>`.
///
/// Functions are first-class values; evaluating a literal captures the
/// environment in force at the definition site (a closure).
#[derive(Debug, Clone)]
pub struct FunctionLiteral {
    pub token: Token,
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
}

impl Node for FunctionLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for FunctionLiteral {
    /// Formats the literal as `fn(<parameters>) { <body> }`.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let params: Vec<String> = self.parameters.iter().map(|p| p.to_string()).collect();
        write!(
            f,
            "{}({}) {{ {} }}",
            self.token_literal(),
            params.join(", "),
            self.body
        )
    }
}

/// A call expression: `<function>(<arguments>)`.
///
/// The function operand is an arbitrary expression: an identifier, a
/// function literal, or anything else that evaluates to a callable.
#[derive(Debug, Clone)]
pub struct CallExpression {
    /// The '(' token
    pub token: Token,
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
}

impl Node for CallExpression {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for CallExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let args: Vec<String> = self.arguments.iter().map(|a| a.to_string()).collect();
        write!(f, "{}({})", self.function, args.join(", "))
    }
}

/// An array literal: `[<elements>]`.
#[derive(Debug, Clone)]
pub struct ArrayLiteral {
    pub token: Token,
    pub elements: Vec<Expression>,
}

impl Node for ArrayLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for ArrayLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let elements: Vec<String> = self.elements.iter().map(|e| e.to_string()).collect();
        write!(f, "[{}]", elements.join(", "))
    }
}

/// An index expression: `<left>[<index>]`.
#[derive(Debug, Clone)]
pub struct IndexExpression {
    /// The '[' token
    pub token: Token,
    pub left: Box<Expression>,
    pub index: Box<Expression>,
}

impl Node for IndexExpression {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for IndexExpression {
    /// Formats the index expression as `(left[index])`.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({}[{}])", self.left, self.index)
    }
}

/// A hash literal: `{<key>: <value>, ...}`.
///
/// Pairs are kept in source order; duplicate keys are permitted and the last
/// write wins at evaluation time.
#[derive(Debug, Clone)]
pub struct HashLiteral {
    /// The '{' token
    pub token: Token,
    pub pairs: Vec<(Expression, Expression)>,
}

impl Node for HashLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for HashLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let pairs: Vec<String> = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}
