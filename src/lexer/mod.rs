pub mod token;

use token::{Token, TokenType, lookup_identifier};

/// Streaming tokenizer for Monkey source text.
///
/// The lexer walks the source as raw bytes; identifiers and digits are
/// ASCII only, while string literals may carry arbitrary UTF-8 between
/// their quotes. `position` is the byte index of `ch` and `read_position`
/// is one past it. Line and column are tracked per token so parser errors
/// can point at the offending spot.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexer {
    input: String,
    position: usize,
    read_position: usize,
    ch: u8, // 0 once the input is exhausted
    line: usize,
    column: usize,
}

/// Identifier bytes: ASCII letters and underscores. Digits never appear in
/// identifiers.
fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

impl Lexer {
    /// Creates a lexer over `input` with the first byte already loaded.
    pub fn new(input: String) -> Self {
        let mut lexer = Lexer {
            input,
            position: 0,
            read_position: 0,
            ch: 0,
            line: 1,
            column: 0, // becomes 1 once the first byte is read
        };
        lexer.read_char();
        lexer
    }

    /// Loads the next byte into `ch` and advances both positions.
    ///
    /// Past the end of the input `ch` stays 0, which the token dispatch
    /// maps to EOF. Leaving a newline bumps the line counter and restarts
    /// the column count.
    fn read_char(&mut self) {
        if self.ch == b'\n' {
            self.line += 1;
            self.column = 0;
        }
        self.ch = if self.read_position >= self.input.len() {
            0
        } else {
            self.input.as_bytes()[self.read_position]
        };
        self.position = self.read_position;
        self.read_position += 1;
        self.column += 1;
    }

    /// One byte of lookahead, without moving the lexer.
    fn peek_char(&self) -> u8 {
        self.input
            .as_bytes()
            .get(self.read_position)
            .copied()
            .unwrap_or(0)
    }

    fn skip_whitespace(&mut self) {
        while self.ch.is_ascii_whitespace() {
            self.read_char();
        }
    }

    /// Consumes an identifier or keyword starting at the current byte.
    fn read_identifier(&mut self) -> String {
        let start = self.position;
        while is_letter(self.ch) {
            self.read_char();
        }
        self.input[start..self.position].to_string()
    }

    /// Consumes a run of digits starting at the current byte.
    fn read_number(&mut self) -> String {
        let start = self.position;
        while is_digit(self.ch) {
            self.read_char();
        }
        self.input[start..self.position].to_string()
    }

    /// Consumes a string literal.
    ///
    /// The current byte is the opening quote; reading stops at the closing
    /// quote or the end of the input, whichever comes first. There are no
    /// escape sequences, the literal is the raw slice between the quotes.
    fn read_string(&mut self) -> String {
        let start = self.position + 1;
        self.read_char();
        while self.ch != b'"' && self.ch != 0 {
            self.read_char();
        }
        self.input[start..self.position].to_string()
    }

    /// Builds a token whose literal is just the current byte.
    fn byte_token(&self, token_type: TokenType, line: usize, column: usize) -> Token {
        Token::new(token_type, (self.ch as char).to_string(), line, column)
    }

    /// Returns the next token and advances past it.
    ///
    /// Whitespace between tokens is skipped. Once the input is exhausted
    /// every further call yields EOF. A byte that fits no rule becomes an
    /// ILLEGAL token carrying that byte as its literal.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        // The token starts here; multi-byte tokens advance past this point
        let line = self.line;
        let column = self.column;

        let token = match self.ch {
            b'=' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    Token::new(TokenType::EQ, "==".to_string(), line, column)
                } else {
                    self.byte_token(TokenType::ASSIGN, line, column)
                }
            }
            b'!' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    Token::new(TokenType::NOTEQ, "!=".to_string(), line, column)
                } else {
                    self.byte_token(TokenType::BANG, line, column)
                }
            }
            b'+' => self.byte_token(TokenType::PLUS, line, column),
            b'-' => self.byte_token(TokenType::MINUS, line, column),
            b'*' => self.byte_token(TokenType::ASTERISK, line, column),
            b'/' => self.byte_token(TokenType::SLASH, line, column),
            b'<' => self.byte_token(TokenType::LT, line, column),
            b'>' => self.byte_token(TokenType::GT, line, column),
            b',' => self.byte_token(TokenType::COMMA, line, column),
            b';' => self.byte_token(TokenType::SEMICOLON, line, column),
            b':' => self.byte_token(TokenType::COLON, line, column),
            b'(' => self.byte_token(TokenType::LPAREN, line, column),
            b')' => self.byte_token(TokenType::RPAREN, line, column),
            b'{' => self.byte_token(TokenType::LBRACE, line, column),
            b'}' => self.byte_token(TokenType::RBRACE, line, column),
            b'[' => self.byte_token(TokenType::LBRACKET, line, column),
            b']' => self.byte_token(TokenType::RBRACKET, line, column),
            b'"' => {
                let literal = self.read_string();
                Token::new(TokenType::STRING, literal, line, column)
            }
            0 => Token::new(TokenType::EOF, "".to_string(), line, column),
            ch => {
                if is_letter(ch) {
                    let literal = self.read_identifier();
                    let token_type = lookup_identifier(&literal);
                    return Token::new(token_type, literal, line, column);
                } else if is_digit(ch) {
                    let literal = self.read_number();
                    return Token::new(TokenType::INT, literal, line, column);
                } else {
                    self.byte_token(TokenType::ILLEGAL, line, column)
                }
            }
        };
        self.read_char();
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use token::TokenType;

    #[test]
    fn test_next_token() {
        let input = r#"let five = 5;
        let ten = 10;
        let add = fn(x, y) {
        x + y;
        };
        let result = add(five, ten);
        !-/*5;
        5 < 10 > 5;
        if (5 < 10) {
        return true;
        } else {
        return false;
        }
        10 == 10;
        10 != 9;
        "foobar"
        "foo bar"
        [1, 2];
        {"foo": "bar"}
        "#
        .to_string();
        let tests = vec![
            (TokenType::LET, "let"),
            (TokenType::IDENT, "five"),
            (TokenType::ASSIGN, "="),
            (TokenType::INT, "5"),
            (TokenType::SEMICOLON, ";"),
            (TokenType::LET, "let"),
            (TokenType::IDENT, "ten"),
            (TokenType::ASSIGN, "="),
            (TokenType::INT, "10"),
            (TokenType::SEMICOLON, ";"),
            (TokenType::LET, "let"),
            (TokenType::IDENT, "add"),
            (TokenType::ASSIGN, "="),
            (TokenType::FUNCTION, "fn"),
            (TokenType::LPAREN, "("),
            (TokenType::IDENT, "x"),
            (TokenType::COMMA, ","),
            (TokenType::IDENT, "y"),
            (TokenType::RPAREN, ")"),
            (TokenType::LBRACE, "{"),
            (TokenType::IDENT, "x"),
            (TokenType::PLUS, "+"),
            (TokenType::IDENT, "y"),
            (TokenType::SEMICOLON, ";"),
            (TokenType::RBRACE, "}"),
            (TokenType::SEMICOLON, ";"),
            (TokenType::LET, "let"),
            (TokenType::IDENT, "result"),
            (TokenType::ASSIGN, "="),
            (TokenType::IDENT, "add"),
            (TokenType::LPAREN, "("),
            (TokenType::IDENT, "five"),
            (TokenType::COMMA, ","),
            (TokenType::IDENT, "ten"),
            (TokenType::RPAREN, ")"),
            (TokenType::SEMICOLON, ";"),
            (TokenType::BANG, "!"),
            (TokenType::MINUS, "-"),
            (TokenType::SLASH, "/"),
            (TokenType::ASTERISK, "*"),
            (TokenType::INT, "5"),
            (TokenType::SEMICOLON, ";"),
            (TokenType::INT, "5"),
            (TokenType::LT, "<"),
            (TokenType::INT, "10"),
            (TokenType::GT, ">"),
            (TokenType::INT, "5"),
            (TokenType::SEMICOLON, ";"),
            (TokenType::IF, "if"),
            (TokenType::LPAREN, "("),
            (TokenType::INT, "5"),
            (TokenType::LT, "<"),
            (TokenType::INT, "10"),
            (TokenType::RPAREN, ")"),
            (TokenType::LBRACE, "{"),
            (TokenType::RETURN, "return"),
            (TokenType::TRUE, "true"),
            (TokenType::SEMICOLON, ";"),
            (TokenType::RBRACE, "}"),
            (TokenType::ELSE, "else"),
            (TokenType::LBRACE, "{"),
            (TokenType::RETURN, "return"),
            (TokenType::FALSE, "false"),
            (TokenType::SEMICOLON, ";"),
            (TokenType::RBRACE, "}"),
            (TokenType::INT, "10"),
            (TokenType::EQ, "=="),
            (TokenType::INT, "10"),
            (TokenType::SEMICOLON, ";"),
            (TokenType::INT, "10"),
            (TokenType::NOTEQ, "!="),
            (TokenType::INT, "9"),
            (TokenType::SEMICOLON, ";"),
            (TokenType::STRING, "foobar"),
            (TokenType::STRING, "foo bar"),
            (TokenType::LBRACKET, "["),
            (TokenType::INT, "1"),
            (TokenType::COMMA, ","),
            (TokenType::INT, "2"),
            (TokenType::RBRACKET, "]"),
            (TokenType::SEMICOLON, ";"),
            (TokenType::LBRACE, "{"),
            (TokenType::STRING, "foo"),
            (TokenType::COLON, ":"),
            (TokenType::STRING, "bar"),
            (TokenType::RBRACE, "}"),
            (TokenType::EOF, ""),
        ];
        let mut lex = Lexer::new(input);
        for (i, (expected_type, expected_literal)) in tests.into_iter().enumerate() {
            let token = lex.next_token();
            // Assert that token type matches the expected type
            assert_eq!(
                token.token_type, expected_type,
                "tests[{}] - tokentype wrong. expected={:?}, got={:?}",
                i, expected_type, token.token_type
            );
            // Assert that token literal matches the expected literal
            assert_eq!(
                token.literal, expected_literal,
                "tests[{}] - literaltype wrong. expected={:?}, got={:?}",
                i, expected_literal, token.literal
            )
        }
    }

    #[test]
    fn test_empty_and_unterminated_strings() {
        let mut lex = Lexer::new(r#""" "unterminated"#.to_string());

        let tok = lex.next_token();
        assert_eq!(tok.token_type, TokenType::STRING);
        assert_eq!(tok.literal, "");

        let tok = lex.next_token();
        assert_eq!(tok.token_type, TokenType::STRING);
        assert_eq!(tok.literal, "unterminated");

        assert_eq!(lex.next_token().token_type, TokenType::EOF);
    }

    #[test]
    fn test_illegal_character() {
        let mut lex = Lexer::new("let @".to_string());
        assert_eq!(lex.next_token().token_type, TokenType::LET);

        let tok = lex.next_token();
        assert_eq!(tok.token_type, TokenType::ILLEGAL);
        assert_eq!(tok.literal, "@");
    }

    #[test]
    fn test_line_and_column_tracking() {
        let mut lex = Lexer::new("let x = 5;\nlet y = 10;".to_string());

        let tok = lex.next_token();
        assert_eq!((tok.line, tok.column), (1, 1), "first 'let'");

        // skip to the second line's 'let'
        for _ in 0..4 {
            lex.next_token();
        }
        let tok = lex.next_token();
        assert_eq!(tok.token_type, TokenType::LET);
        assert_eq!(tok.line, 2, "second 'let' should be on line 2");
        assert_eq!(tok.column, 1, "second 'let' should be at column 1");
    }
}
