//! Error reporting for malformed input

use anneal_parser::{parse_program, parse_query, Construct, ParseError, ParserConfig};

fn syntax_position(err: &ParseError) -> (usize, usize) {
    match err {
        ParseError::Syntax { line, column, .. } => (*line, *column),
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_missing_close_paren_and_period() {
    let err = parse_program("likes(john, mary").unwrap_err();
    assert_eq!(syntax_position(&err), (1, 17));
    let message = err.to_string();
    assert!(message.contains("')'"), "{}", message);
    assert!(message.contains("end of input"), "{}", message);
}

#[test]
fn test_missing_period() {
    let err = parse_program("a.\nlikes(john, mary)\nb.").unwrap_err();
    assert_eq!(syntax_position(&err), (3, 1));
}

#[test]
fn test_error_on_later_line() {
    let err = parse_program("ok(1).\nok(2).\nbroken(, x).").unwrap_err();
    assert_eq!(syntax_position(&err), (3, 8));
}

#[test]
fn test_empty_program_rejected() {
    let err = parse_program("  % nothing here\n").unwrap_err();
    assert_eq!(syntax_position(&err), (2, 1));
}

#[test]
fn test_trailing_line_comment_without_newline() {
    // A `%` comment must end with a line terminator
    let err = parse_program("likes(john, mary). % done").unwrap_err();
    let ParseError::Syntax { column, found, .. } = err else {
        panic!("expected syntax error");
    };
    assert_eq!(column, 20);
    assert_eq!(found, "'%'");

    assert!(parse_program("likes(john, mary). % done\n").is_ok());
}

#[test]
fn test_unterminated_block_comment_is_fatal() {
    let err = parse_program("a.\n/* never /* closed */\nb.").unwrap_err();
    assert_eq!(
        err,
        ParseError::Unterminated { construct: Construct::BlockComment, line: 2, column: 1 }
    );
    assert!(err.is_fatal());
}

#[test]
fn test_unterminated_quoted_atom_is_fatal() {
    let err = parse_program("a.\nsay('hello).\n").unwrap_err();
    assert_eq!(
        err,
        ParseError::Unterminated { construct: Construct::QuotedAtom, line: 2, column: 5 }
    );
}

#[test]
fn test_numeral_overflow_is_fatal() {
    let err = parse_program("big(123456789012345678901234567890).").unwrap_err();
    assert!(matches!(err, ParseError::NumeralOverflow { line: 1, column: 5, .. }));
    assert!(err.to_string().contains("123456789012345678901234567890"));
}

#[test]
fn test_chained_arithmetic_is_rejected() {
    // Only one binary application per precedence level
    let err = parse_program("X is 1 + 2 + 3.").unwrap_err();
    assert_eq!(syntax_position(&err), (1, 12));
}

#[test]
fn test_query_errors() {
    assert_eq!(syntax_position(&parse_query("likes(X, Y)").unwrap_err()), (1, 1));
    assert_eq!(syntax_position(&parse_query("?- ").unwrap_err()), (1, 4));
    assert_eq!(syntax_position(&parse_query("?- a. b").unwrap_err()), (1, 7));
}

#[test]
fn test_no_partial_tree_on_error() {
    let result = parse_program("good(1).\ngood(2).\nbad(");
    assert!(result.is_err());
}

/// `deep(f(f(...x...)))` with `depth` nested argument lists
fn nested_structures(depth: usize) -> String {
    format!("deep({}x{}).", "f(".repeat(depth - 1), ")".repeat(depth))
}

/// `X = ((...1...))` with `depth` parentheses
fn nested_parentheses(depth: usize) -> String {
    format!("X = {}1{}.", "(".repeat(depth), ")".repeat(depth))
}

#[test]
fn test_default_depth_limit_fits_thread_stack() {
    let limit = ParserConfig::default().max_depth;
    let handle = std::thread::Builder::new()
        .stack_size(2 << 20)
        .spawn(move || {
            assert!(parse_program(&nested_structures(limit)).is_ok());
            assert!(parse_program(&nested_parentheses(limit)).is_ok());

            let err = parse_program(&nested_structures(limit + 1)).unwrap_err();
            assert!(matches!(err, ParseError::NestingTooDeep { limit: l, .. } if l == limit));
            let err = parse_program(&nested_parentheses(limit + 1)).unwrap_err();
            assert!(matches!(err, ParseError::NestingTooDeep { .. }));
        })
        .unwrap();
    handle.join().unwrap();
}
