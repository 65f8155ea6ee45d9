//! Parser for the Monkey language producing an Abstract Syntax Tree (AST).
//!
//! This module exposes the `Parser` struct that turns tokens from the `lexer`
//! module into an AST.
//!
//! Parsing approach:
//! - Maintains a two-token lookahead (`curr_token`, `peek_token`).
//! - Dispatches expressions through per-token prefix and infix parse
//!   functions driven by a precedence comparison (Pratt parsing).
//! - Provides helpers like `expect_peek`, `is_curr_token`, and `is_peek_token`.
//! - Reports errors via the `errors` collection and keeps parsing
//!   best-effort; failed sub-parses propagate as `None`.

pub mod error;
mod precedence;
pub mod test_helper;

use crate::ast::{
    Program,
    expression::{
        ArrayLiteral, BlockStatement, BooleanLiteral, CallExpression, Expression, FunctionLiteral,
        HashLiteral, Identifier, IfExpression, IndexExpression, InfixExpression, IntegerLiteral,
        PrefixExpression, StringLiteral,
    },
    statement::{ExpressionStatement, LetStatement, ReturnStatement, Statement},
};
use crate::lexer::{
    Lexer,
    token::{Token, TokenType},
};
use crate::parser::error::{ParserError, ParserErrorType, ParserErrors};
use precedence::Precedence;
use std::collections::HashMap;

/// A parser that converts tokens from a lexer into an Abstract Syntax Tree (AST).
///
/// The parser maintains a two-token lookahead buffer (current and peek tokens)
/// to make parsing decisions. It processes tokens sequentially and builds
/// the AST by parsing different statement types.
#[derive(Debug, Clone)]
pub struct Parser {
    l: Lexer,
    curr_token: Token,
    peek_token: Token,
    pub errors: ParserErrors,
    prefix_parse_fns: HashMap<TokenType, PrefixParseFn>,
    infix_parse_fns: HashMap<TokenType, InfixParseFn>,
}

type PrefixParseFn = fn(&mut Parser) -> Option<Expression>;
type InfixParseFn = fn(&mut Parser, Expression) -> Option<Expression>;

impl Parser {
    /// Creates a new parser instance with the given lexer.
    ///
    /// Initializes the parser with empty tokens and then reads the first two tokens
    /// to set up the lookahead buffer. This ensures the parser always has
    /// both current and peek tokens available for parsing decisions.
    pub fn new(l: Lexer) -> Self {
        let mut p = Parser {
            l,
            curr_token: Token::new(TokenType::EOF, "".to_string(), 0, 0),
            peek_token: Token::new(TokenType::EOF, "".to_string(), 0, 0),
            errors: ParserErrors::new(),
            prefix_parse_fns: HashMap::new(),
            infix_parse_fns: HashMap::new(),
        };
        // Register prefix parse functions
        p.register_prefix_parse_fn(TokenType::IDENT, Parser::parse_identifier);
        p.register_prefix_parse_fn(TokenType::INT, Parser::parse_integer_literal);
        p.register_prefix_parse_fn(TokenType::STRING, Parser::parse_string_literal);
        p.register_prefix_parse_fn(TokenType::BANG, Parser::parse_prefix_expression);
        p.register_prefix_parse_fn(TokenType::MINUS, Parser::parse_prefix_expression);
        p.register_prefix_parse_fn(TokenType::TRUE, Parser::parse_boolean_literal);
        p.register_prefix_parse_fn(TokenType::FALSE, Parser::parse_boolean_literal);
        p.register_prefix_parse_fn(TokenType::LPAREN, Parser::parse_grouped_expression);
        p.register_prefix_parse_fn(TokenType::IF, Parser::parse_if_expression);
        p.register_prefix_parse_fn(TokenType::FUNCTION, Parser::parse_function_literal);
        p.register_prefix_parse_fn(TokenType::LBRACKET, Parser::parse_array_literal);
        p.register_prefix_parse_fn(TokenType::LBRACE, Parser::parse_hash_literal);
        // Register infix parse functions
        p.register_infix_parse_fn(TokenType::PLUS, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::MINUS, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::SLASH, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::ASTERISK, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::EQ, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::NOTEQ, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::LT, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::GT, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::LPAREN, Parser::parse_call_expression);
        p.register_infix_parse_fn(TokenType::LBRACKET, Parser::parse_index_expression);
        // Advance the token buffer to have a two-token lookahead
        p.next_token();
        p.next_token();
        p
    }

    /// Advances the token buffer by one position.
    ///
    /// Moves the peek token to the current token position and reads
    /// the next token from the lexer into the peek position. This maintains
    /// the two-token lookahead buffer/window used for parsing decisions.
    fn next_token(&mut self) {
        self.curr_token = self.peek_token.clone();
        self.peek_token = self.l.next_token();
    }

    /// Checks if the current token matches the expected token type.
    fn is_curr_token(&self, token_type: TokenType) -> bool {
        self.curr_token.token_type == token_type
    }

    /// Checks if the peek token matches the expected token type.
    fn is_peek_token(&self, token_type: TokenType) -> bool {
        self.peek_token.token_type == token_type
    }

    /// Expects the peek token to be of a specific type and advances if it matches.
    ///
    /// If the peek token matches the expected type, advances the token buffer
    /// and returns true. If it doesn't match, adds an error to the parser's
    /// error list and returns false. This is used for enforcing syntax rules.
    fn expect_peek(&mut self, token_type: TokenType) -> bool {
        if self.is_peek_token(token_type) {
            self.next_token();
            true
        } else {
            self.record_error(ParserError::expected_token(token_type, &self.peek_token));
            false
        }
    }

    /// Logs an error and pushes it into the parser's error collection.
    fn record_error(&mut self, error: ParserError) {
        log::error!("{}", error);
        self.errors.push(error);
    }

    fn no_prefix_parse_function_error(&mut self) {
        let error = ParserError::no_prefix_fn(&self.curr_token);
        self.record_error(error);
    }

    fn register_prefix_parse_fn(&mut self, token_type: TokenType, parse_fn: PrefixParseFn) {
        self.prefix_parse_fns.insert(token_type, parse_fn);
    }

    fn register_infix_parse_fn(&mut self, token_type: TokenType, parse_fn: InfixParseFn) {
        self.infix_parse_fns.insert(token_type, parse_fn);
    }

    /// Returns a reference to the parser's error collection.
    ///
    /// Allows external code to check if any parsing errors occurred
    /// during the parsing process.
    pub fn errors(&self) -> &ParserErrors {
        &self.errors
    }

    /// Parses the entire program and returns the root AST node.
    ///
    /// Iterates through all tokens until EOF is reached, parsing each
    /// statement encountered. Collects all successfully parsed statements
    /// into a Program node. If parsing of a statement fails, it continues
    /// with the next statement rather than stopping the entire parse.
    pub fn parse_program(&mut self) -> Program {
        log::trace!("Starting to parse program");
        let mut program = Program {
            statements: Vec::new(),
        };
        // Loop until EOF is reached
        while self.curr_token.token_type != TokenType::EOF {
            log::trace!(
                "[{}:{}] Parsing statement, curr_token={:?}, peek_token={:?}",
                self.curr_token.line,
                self.curr_token.column,
                self.curr_token.token_type,
                self.peek_token.token_type
            );
            let statement = self.parse_statement();
            if let Some(stmt) = statement {
                program.statements.push(stmt);
            }
            self.next_token();
        }
        log::trace!(
            "Finished parsing program, {} statements parsed",
            program.statements.len()
        );
        program
    }

    /// Parses a single statement based on the current token type.
    ///
    /// LET and RETURN tokens start their dedicated statement forms; anything
    /// else is parsed as an expression statement.
    fn parse_statement(&mut self) -> Option<Statement> {
        match self.curr_token.token_type {
            TokenType::LET => self.parse_let_statement().map(Statement::Let),
            TokenType::RETURN => self.parse_return_statement().map(Statement::Return),
            _ => self.parse_expression_statement().map(Statement::Expression),
        }
    }

    /// Parses a let statement with the format: let <identifier> = <expression>;
    ///
    /// Expects the current token to be LET. Parses the identifier name,
    /// expects an equals sign, and parses the value expression. The trailing
    /// semicolon is optional.
    fn parse_let_statement(&mut self) -> Option<LetStatement> {
        let token = self.curr_token.clone();

        // Expect identifier after 'let'
        if !self.expect_peek(TokenType::IDENT) {
            return None;
        }
        // Parse the identifier
        let name = Identifier {
            token: self.curr_token.clone(),
            value: self.curr_token.literal.clone(),
        };

        // Expect '=' after identifier
        if !self.expect_peek(TokenType::ASSIGN) {
            return None;
        }
        // Advance to the next token to point to the value and parse the expression
        self.next_token();
        let value = match self.parse_expression(Precedence::LOWEST as i32) {
            Some(expr) => expr,
            None => {
                let error = ParserError::at_token(
                    ParserErrorType::FailedToParseExpression {
                        context: "in let statement",
                    },
                    &self.curr_token,
                );
                self.record_error(error);
                return None;
            }
        };

        // Semicolon is optional
        if self.is_peek_token(TokenType::SEMICOLON) {
            self.next_token();
        }

        Some(LetStatement { token, name, value })
    }

    /// Parses a return statement with the format: return <expression>;
    ///
    /// Expects the current token to be RETURN. Parses the returned
    /// expression; the trailing semicolon is optional.
    fn parse_return_statement(&mut self) -> Option<ReturnStatement> {
        let token = self.curr_token.clone();

        // Advance to the next token to point to the value and parse the expression
        self.next_token();
        let value = match self.parse_expression(Precedence::LOWEST as i32) {
            Some(expr) => expr,
            None => {
                let error = ParserError::at_token(
                    ParserErrorType::FailedToParseExpression {
                        context: "in return statement",
                    },
                    &self.curr_token,
                );
                self.record_error(error);
                return None;
            }
        };

        // Semicolon is optional
        if self.is_peek_token(TokenType::SEMICOLON) {
            self.next_token();
        }

        Some(ReturnStatement { token, value })
    }

    /// Parses an expression statement, which is an expression optionally
    /// followed by a semicolon.
    ///
    /// An expression statement wraps an expression in a statement context, allowing
    /// expressions to be used as standalone statements.
    fn parse_expression_statement(&mut self) -> Option<ExpressionStatement> {
        let token = self.curr_token.clone();
        let expr = self.parse_expression(Precedence::LOWEST as i32)?;

        // Semicolon is optional
        if self.is_peek_token(TokenType::SEMICOLON) {
            self.next_token();
        }

        Some(ExpressionStatement { token, value: expr })
    }

    /// Parses an expression starting from the current token position.
    ///
    /// This is the main entry point for expression parsing. It uses the Pratt
    /// parsing algorithm: a prefix parse function for the current token
    /// produces the left-hand side, then infix parse functions extend it
    /// leftward while the peek token binds more tightly than `precedence`.
    ///
    /// # Parameters
    /// - `precedence`: The minimum precedence level required to continue parsing.
    ///
    /// # Returns
    /// - `Some(Expression)` if parsing succeeds
    /// - `None` if no parse function is registered for the current token type
    ///
    /// # Errors
    /// Adds an error to the parser's error list if no parse function is found for
    /// the current token type.
    fn parse_expression(&mut self, precedence: i32) -> Option<Expression> {
        log::trace!(
            "[{}:{}] parse_expression called with precedence={}, curr_token={:?}",
            self.curr_token.line,
            self.curr_token.column,
            precedence,
            self.curr_token.token_type
        );
        let token_type = self.curr_token.token_type;
        let prefix = self.prefix_parse_fns.get(&token_type).copied();
        // If the prefix parse function is found, parse the left-hand side expression
        let mut left = if let Some(prefix_parse_fn) = prefix {
            prefix_parse_fn(self)?
        } else {
            self.no_prefix_parse_function_error();
            return None;
        };

        // While the next operator binds tighter than our caller, keep folding
        // the left-hand side into infix expressions
        while !self.is_peek_token(TokenType::SEMICOLON) && precedence < self.peek_precedence() {
            let peek_token_type = self.peek_token.token_type;
            log::trace!(
                "[{}:{}] Continuing infix parsing, peek_token={:?}, peek_precedence={}",
                self.peek_token.line,
                self.peek_token.column,
                peek_token_type,
                self.peek_precedence()
            );
            let infix = self.infix_parse_fns.get(&peek_token_type).copied();
            // If the infix parse function is not found, return the left-hand side expression
            let Some(infix_parse_fn) = infix else {
                return Some(left);
            };
            self.next_token();
            left = infix_parse_fn(self, left)?;
        }

        Some(left)
    }

    /// Returns the precedence level for the next token.
    /// If no precedence is found, returns the lowest precedence.
    fn peek_precedence(&self) -> i32 {
        Precedence::from_token_type(&self.peek_token.token_type)
    }

    /// Returns the precedence level for the current token.
    /// If no precedence is found, returns the lowest precedence.
    fn curr_precedence(&self) -> i32 {
        Precedence::from_token_type(&self.curr_token.token_type)
    }

    /// Parses an identifier expression.
    /// Expects the current token to be an identifier. Returns an Identifier expression.
    fn parse_identifier(&mut self) -> Option<Expression> {
        let token = self.curr_token.clone();
        let value = self.curr_token.literal.clone();
        Some(Expression::Identifier(Identifier { token, value }))
    }

    /// Parses an integer literal expression from the current token.
    ///
    /// Expects the current token to be of type `INT`. Extracts the integer value
    /// from the token's literal string by parsing it as a 64-bit signed integer.
    ///
    /// # Returns
    /// An `Option<Expression>` containing an `IntegerLiteral` variant if parsing succeeds.
    /// Returns `None` and adds an error if the token literal cannot be parsed as an integer.
    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.curr_token.clone();
        match token.literal.parse::<i64>() {
            Ok(value) => Some(Expression::IntegerLiteral(IntegerLiteral { token, value })),
            Err(_) => {
                let error = ParserError::invalid_integer(&token);
                self.record_error(error);
                None
            }
        }
    }

    /// Parses a string literal expression from the current token.
    ///
    /// The token literal already holds the raw contents between the quotes.
    fn parse_string_literal(&mut self) -> Option<Expression> {
        let token = self.curr_token.clone();
        let value = token.literal.clone();
        Some(Expression::StringLiteral(StringLiteral { token, value }))
    }

    /// Parses a boolean literal expression from the current token.
    ///
    /// Expects the current token to be of type `TRUE` or `FALSE`. Determines
    /// the boolean value by checking the token type.
    fn parse_boolean_literal(&mut self) -> Option<Expression> {
        let token = self.curr_token.clone();
        let value = self.is_curr_token(TokenType::TRUE);
        Some(Expression::BooleanLiteral(BooleanLiteral { token, value }))
    }

    /// Parses a prefix expression (e.g., `!true`, `-5`).
    ///
    /// Expects the current token to be a prefix operator (BANG or MINUS).
    /// Extracts the operator, advances to the next token, and parses the
    /// right-hand expression with PREFIX precedence.
    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        log::trace!(
            "Parsing prefix expression with operator {:?}",
            self.curr_token.token_type
        );
        let token = self.curr_token.clone();
        let operator = self.curr_token.literal.clone();

        // Advance to the next token (the right-hand expression)
        self.next_token();

        // Parse the right-hand expression with PREFIX precedence
        let right = match self.parse_expression(Precedence::PREFIX as i32) {
            Some(expr) => expr,
            None => {
                let error = ParserError::prefix_rhs_failed(&operator, &self.curr_token);
                self.record_error(error);
                return None;
            }
        };

        Some(Expression::PrefixExpression(PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    /// Parses an infix expression (e.g., `5 + 5`, `x == y`).
    ///
    /// Expects the current token to be an infix operator. The operator's own
    /// precedence is passed down when parsing the right-hand side, which makes
    /// all binary operators left-associative.
    ///
    /// # Parameters
    /// - `left`: The already-parsed left-hand side expression
    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        log::trace!(
            "Parsing infix expression with operator {:?}",
            self.curr_token.token_type
        );
        let token = self.curr_token.clone();
        let operator = self.curr_token.literal.clone();

        // Capture the operator precedence, then advance to the right operand
        let precedence = self.curr_precedence();
        self.next_token();

        let right = match self.parse_expression(precedence) {
            Some(expr) => expr,
            None => {
                let error = ParserError::infix_rhs_failed(&operator, &self.curr_token);
                self.record_error(error);
                return None;
            }
        };
        Some(Expression::InfixExpression(InfixExpression {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    /// Parses a grouped expression (e.g., `(5 + 5)`).
    ///
    /// Expects the current token to be a left parenthesis. Parses the
    /// expression inside the parentheses at the lowest precedence.
    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        // Skip the left parenthesis
        self.next_token();

        let expr = match self.parse_expression(Precedence::LOWEST as i32) {
            Some(e) => e,
            None => {
                let error = ParserError::at_token(
                    ParserErrorType::FailedToParseGroupedExpression,
                    &self.curr_token,
                );
                self.record_error(error);
                return None;
            }
        };

        if !self.expect_peek(TokenType::RPAREN) {
            // Error already added by expect_peek
            return None;
        }

        Some(expr)
    }

    /// Parses an if expression (e.g., `if (<condition>) <consequence> else <alternative>`).
    ///
    /// Expects the current token to be an if keyword. Parses the condition,
    /// consequence block, and the optional alternative block.
    fn parse_if_expression(&mut self) -> Option<Expression> {
        log::trace!("Parsing if expression");
        let token = self.curr_token.clone();

        if !self.expect_peek(TokenType::LPAREN) {
            return None;
        }
        // Advance to the condition and parse it with the lowest precedence
        self.next_token();
        let condition = match self.parse_expression(Precedence::LOWEST as i32) {
            Some(e) => e,
            None => {
                let error = ParserError::at_token(
                    ParserErrorType::FailedToParseIfCondition,
                    &self.curr_token,
                );
                self.record_error(error);
                return None;
            }
        };
        if !self.expect_peek(TokenType::RPAREN) {
            return None;
        }
        if !self.expect_peek(TokenType::LBRACE) {
            return None;
        }
        let consequence = match self.parse_block_statement() {
            Some(block) => block,
            None => {
                let error = ParserError::at_token(
                    ParserErrorType::FailedToParseIfBlock {
                        context: "consequence",
                    },
                    &self.curr_token,
                );
                self.record_error(error);
                return None;
            }
        };
        // If the next token is an else keyword, parse the alternative block
        let alternative = if self.is_peek_token(TokenType::ELSE) {
            self.next_token();

            if !self.expect_peek(TokenType::LBRACE) {
                return None;
            }
            match self.parse_block_statement() {
                Some(block) => Some(block),
                None => {
                    let error = ParserError::at_token(
                        ParserErrorType::FailedToParseIfBlock {
                            context: "alternative",
                        },
                        &self.curr_token,
                    );
                    self.record_error(error);
                    return None;
                }
            }
        } else {
            None
        };
        Some(Expression::IfExpression(IfExpression {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    /// Parses a block statement (e.g., `{ <statements> }`).
    ///
    /// Expects the current token to be a left brace. Parses statements until
    /// the matching right brace or EOF; hitting EOF first is an error.
    fn parse_block_statement(&mut self) -> Option<BlockStatement> {
        log::trace!("Parsing block statement");
        let token = self.curr_token.clone();
        let mut statements = Vec::new();

        self.next_token();
        while !self.is_curr_token(TokenType::RBRACE) && !self.is_curr_token(TokenType::EOF) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            // Keep going on statement failure to collect more errors
            self.next_token();
        }
        if self.is_curr_token(TokenType::EOF) {
            let error = ParserError::at_token(ParserErrorType::UnexpectedEOF, &self.curr_token);
            self.record_error(error);
            return None;
        }
        Some(BlockStatement { token, statements })
    }

    /// Parses a function literal expression (e.g., `fn(<parameters>) <body>`).
    ///
    /// Expects the current token to be the `fn` keyword. Parses the parameter
    /// list and the body block.
    fn parse_function_literal(&mut self) -> Option<Expression> {
        log::trace!("Parsing function literal");
        let token = self.curr_token.clone();
        if !self.expect_peek(TokenType::LPAREN) {
            return None;
        }
        let parameters = match self.parse_function_parameters() {
            Some(p) => p,
            None => {
                let error = ParserError::at_token(
                    ParserErrorType::FailedToParseFunctionParameters,
                    &self.curr_token,
                );
                self.record_error(error);
                return None;
            }
        };
        if !self.expect_peek(TokenType::LBRACE) {
            return None;
        }
        let body = match self.parse_block_statement() {
            Some(block) => block,
            None => {
                let error = ParserError::at_token(
                    ParserErrorType::FailedToParseFunctionBody,
                    &self.curr_token,
                );
                self.record_error(error);
                return None;
            }
        };
        Some(Expression::FunctionLiteral(FunctionLiteral {
            token,
            parameters,
            body,
        }))
    }

    /// Parses the function parameters (e.g., `x, y`).
    ///
    /// Expects the current token to be the left parenthesis. Parses a
    /// comma-separated list of identifiers (possibly empty) up to the closing
    /// right parenthesis.
    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut parameters = Vec::new();
        if self.is_peek_token(TokenType::RPAREN) {
            self.next_token();
            return Some(parameters);
        }
        // Advance to the first parameter
        self.next_token();

        if !self.is_curr_token(TokenType::IDENT) {
            let error = ParserError::expected_param_ident(&self.curr_token);
            self.record_error(error);
            return None;
        }
        parameters.push(Identifier {
            token: self.curr_token.clone(),
            value: self.curr_token.literal.clone(),
        });

        // Parse remaining parameters
        while self.is_peek_token(TokenType::COMMA) {
            self.next_token();
            self.next_token();

            if !self.is_curr_token(TokenType::IDENT) {
                let error = ParserError::expected_param_ident(&self.curr_token);
                self.record_error(error);
                return None;
            }
            parameters.push(Identifier {
                token: self.curr_token.clone(),
                value: self.curr_token.literal.clone(),
            });
        }

        if !self.expect_peek(TokenType::RPAREN) {
            return None;
        }

        Some(parameters)
    }

    /// Parses a call expression (e.g., `add(1, 2 * 3)`).
    ///
    /// Invoked as an infix handler when `(` follows a parsed expression; the
    /// already-parsed expression is the function being called.
    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        log::trace!("Parsing call expression");
        let token = self.curr_token.clone();
        let arguments = self.parse_expression_list(TokenType::RPAREN)?;
        Some(Expression::CallExpression(CallExpression {
            token,
            function: Box::new(function),
            arguments,
        }))
    }

    /// Parses an array literal (e.g., `[1, 2 * 2, 3 + 3]`).
    fn parse_array_literal(&mut self) -> Option<Expression> {
        log::trace!("Parsing array literal");
        let token = self.curr_token.clone();
        let elements = self.parse_expression_list(TokenType::RBRACKET)?;
        Some(Expression::ArrayLiteral(ArrayLiteral { token, elements }))
    }

    /// Parses an index expression (e.g., `myArray[1 + 1]`).
    ///
    /// Invoked as an infix handler when `[` follows a parsed expression.
    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        log::trace!("Parsing index expression");
        let token = self.curr_token.clone();

        self.next_token();
        let index = match self.parse_expression(Precedence::LOWEST as i32) {
            Some(expr) => expr,
            None => {
                let error = ParserError::at_token(
                    ParserErrorType::FailedToParseExpression {
                        context: "as index",
                    },
                    &self.curr_token,
                );
                self.record_error(error);
                return None;
            }
        };

        if !self.expect_peek(TokenType::RBRACKET) {
            return None;
        }

        Some(Expression::IndexExpression(IndexExpression {
            token,
            left: Box::new(left),
            index: Box::new(index),
        }))
    }

    /// Parses a hash literal (e.g., `{"one": 1, "two": 2}`).
    ///
    /// Keys and values are arbitrary expressions separated by a colon; pairs
    /// are kept in source order and duplicate keys are resolved at evaluation.
    fn parse_hash_literal(&mut self) -> Option<Expression> {
        log::trace!("Parsing hash literal");
        let token = self.curr_token.clone();
        let mut pairs = Vec::new();

        while !self.is_peek_token(TokenType::RBRACE) {
            if self.is_peek_token(TokenType::EOF) {
                let error = ParserError::at_token(ParserErrorType::UnexpectedEOF, &self.peek_token);
                self.record_error(error);
                return None;
            }
            self.next_token();
            let key = match self.parse_expression(Precedence::LOWEST as i32) {
                Some(expr) => expr,
                None => {
                    let error = ParserError::at_token(
                        ParserErrorType::FailedToParseExpression {
                            context: "as hash key",
                        },
                        &self.curr_token,
                    );
                    self.record_error(error);
                    return None;
                }
            };

            if !self.expect_peek(TokenType::COLON) {
                return None;
            }

            self.next_token();
            let value = match self.parse_expression(Precedence::LOWEST as i32) {
                Some(expr) => expr,
                None => {
                    let error = ParserError::at_token(
                        ParserErrorType::FailedToParseExpression {
                            context: "as hash value",
                        },
                        &self.curr_token,
                    );
                    self.record_error(error);
                    return None;
                }
            };

            pairs.push((key, value));

            if !self.is_peek_token(TokenType::RBRACE) && !self.expect_peek(TokenType::COMMA) {
                return None;
            }
        }

        if !self.expect_peek(TokenType::RBRACE) {
            return None;
        }

        Some(Expression::HashLiteral(HashLiteral { token, pairs }))
    }

    /// Parses a comma-separated expression list ending at `end`.
    ///
    /// Shared by call arguments (`end` = RPAREN) and array literals
    /// (`end` = RBRACKET). An immediately-closing list is empty.
    fn parse_expression_list(&mut self, end: TokenType) -> Option<Vec<Expression>> {
        let mut list = Vec::new();

        if self.is_peek_token(end) {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        let first = match self.parse_expression(Precedence::LOWEST as i32) {
            Some(expr) => expr,
            None => {
                let error = ParserError::at_token(
                    ParserErrorType::FailedToParseExpression {
                        context: "in expression list",
                    },
                    &self.curr_token,
                );
                self.record_error(error);
                return None;
            }
        };
        list.push(first);

        while self.is_peek_token(TokenType::COMMA) {
            self.next_token();
            self.next_token();
            let expr = match self.parse_expression(Precedence::LOWEST as i32) {
                Some(expr) => expr,
                None => {
                    let error = ParserError::at_token(
                        ParserErrorType::FailedToParseExpression {
                            context: "in expression list",
                        },
                        &self.curr_token,
                    );
                    self.record_error(error);
                    return None;
                }
            };
            list.push(expr);
        }

        if !self.is_peek_token(end) {
            let error = ParserError::unclosed_list(end, &self.peek_token);
            self.record_error(error);
            return None;
        }
        self.next_token();

        Some(list)
    }
}
