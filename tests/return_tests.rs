use monkey_interpreter::ast::{Node, Statement};
use monkey_interpreter::parser::test_helper::*;
use monkey_interpreter::{Lexer, Parser};

/// Tests parsing of multiple return statements.
#[test]
fn test_parsing_return_statements() {
    let input = r#"
return 5;
return 10;
return 993322;
"#
    .to_string();

    let l = Lexer::new(input);
    let mut p = Parser::new(l);

    let program = p.parse_program();
    check_parser_errors(&p);

    assert_eq!(
        program.statements.len(),
        3,
        "program.statements does not contain 3 statements. got={}",
        program.statements.len()
    );

    for stmt in &program.statements {
        match stmt {
            Statement::Return(return_stmt) => {
                assert_eq!(
                    return_stmt.token_literal(),
                    "return",
                    "return_stmt.token_literal not 'return', got {}",
                    return_stmt.token_literal()
                );
            }
            _ => panic!("stmt not ReturnStatement. got={:?}", stmt),
        }
    }
}

/// Tests that return statements carry the expected values.
#[test]
fn test_return_statement_values() {
    let tests: Vec<(&str, Expected)> = vec![
        ("return 5;", Expected::Int(5)),
        ("return true;", Expected::Bool(true)),
        ("return foobar;", Expected::Ident("foobar")),
    ];

    for (input, expected_value) in tests {
        let l = Lexer::new(input.to_string());
        let mut p = Parser::new(l);
        let program = p.parse_program();
        check_parser_errors(&p);

        assert_eq!(program.statements.len(), 1);
        let return_stmt = match &program.statements[0] {
            Statement::Return(stmt) => stmt,
            other => panic!("stmt not ReturnStatement. got={:?}", other),
        };
        test_literal_expression(&return_stmt.value, &expected_value);
    }
}
