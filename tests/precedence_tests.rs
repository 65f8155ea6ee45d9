use monkey_interpreter::parser::test_helper::check_parser_errors;
use monkey_interpreter::{Lexer, Parser};

/// Tests operator precedence parsing to ensure expressions are parsed correctly
/// according to operator precedence rules.
#[test]
fn test_operator_precedence_parsing() {
    let tests: Vec<(&str, &str)> = vec![
        // Prefix operators with infix operators
        ("-a * b;", "((-a) * b)"),
        ("!-a;", "(!(-a))"),
        // Left-associative operators
        ("a + b + c;", "((a + b) + c)"),
        ("a + b - c;", "((a + b) - c)"),
        ("a * b * c;", "((a * b) * c)"),
        ("a * b / c;", "((a * b) / c)"),
        // Precedence: multiplication/division higher than addition/subtraction
        ("a + b / c;", "(a + (b / c))"),
        ("a + b * c + d / e - f;", "(((a + (b * c)) + (d / e)) - f)"),
        // Multiple statements
        ("3 + 4; -5 * 5;", "(3 + 4)((-5) * 5)"),
        // Comparison operators
        ("5 > 4 == 3 < 4;", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4;", "((5 < 4) != (3 > 4))"),
        // Mixed precedence
        (
            "3 + 4 * 5 == 3 * 1 + 4 * 5;",
            "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
        ),
        // Boolean operators
        ("true;", "true"),
        ("false;", "false"),
        ("3 > 5 == false;", "((3 > 5) == false)"),
        ("3 < 5 == true;", "((3 < 5) == true)"),
        // Grouped expressions override precedence
        ("1 + (2 + 3) + 4;", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2;", "((5 + 5) * 2)"),
        ("2 / (5 + 5);", "(2 / (5 + 5))"),
        ("-(5 + 5);", "(-(5 + 5))"),
        ("!(true == true);", "(!(true == true))"),
        // Calls bind tighter than arithmetic
        ("a + add(b * c) + d;", "((a + add((b * c))) + d)"),
        (
            "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8));",
            "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
        ),
        ("add(a + b + c * d / f + g);", "add((((a + b) + ((c * d) / f)) + g))"),
        // Index binds tighter than calls
        (
            "a * [1, 2, 3, 4][b * c] * d;",
            "((a * ([1, 2, 3, 4][(b * c)])) * d)",
        ),
        (
            "add(a * b[2], b[1], 2 * [1, 2][1]);",
            "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
        ),
    ];

    for (input, expected) in tests {
        let l = Lexer::new(input.to_string());
        let mut p = Parser::new(l);
        let program = p.parse_program();

        check_parser_errors(&p);

        let actual = format!("{}", program);
        assert_eq!(
            actual, expected,
            "expected={:?}, got={:?}",
            expected, actual
        );
    }
}

/// Re-parsing a program's string form produces the same string form.
#[test]
fn test_program_string_is_stable_under_reparsing() {
    let inputs = vec![
        "let x = 5 * (2 + 10);",
        "-a * b + c / d;",
        "!(true == true);",
        "if (x < y) { x } else { y }",
        "let add = fn(a, b) { a + b; }; add(1, 2 * 3);",
        "let h = {one: 1, 2: two, true: 3}; h[2];",
        "return [1, 2 + 3][0];",
        "add(a, b[1], 2 * 3);",
    ];

    for input in inputs {
        let mut p = Parser::new(Lexer::new(input.to_string()));
        let program = p.parse_program();
        check_parser_errors(&p);
        let once = format!("{}", program);

        let mut p = Parser::new(Lexer::new(once.clone()));
        let reparsed = p.parse_program();
        check_parser_errors(&p);
        let twice = format!("{}", reparsed);

        assert_eq!(once, twice, "string form changed after reparsing {:?}", input);
    }
}
