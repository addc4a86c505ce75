//! Tests for error accumulation and strict mode.

mod common;
use common::*;

use sqlscan_core::components::{Expression, ParseOptions};
use sqlscan_core::{Error, Lexer, Parser};

#[test]
fn lex_errors_are_collected_in_order() {
    let lexed = lex("SELECT * FROM db..tbl $");
    let messages: Vec<_> = lexed.errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["Unexpected dot.", "Unexpected character."]);
    assert!(!lexed.list.is_empty());
    assert_eq!(lexed.list.build(), "SELECT * FROM db..tbl $");
}

#[test]
fn lex_errors_reach_the_parse_result() {
    let parsed = parse_any("SELECT * FROM db..tbl $");
    assert!(!parsed.is_clean());
    assert_eq!(parsed.lex_errors.len(), 2);
    assert_eq!(parsed.statements.len(), 1);
    let first = parsed.diagnostics().next().unwrap();
    assert_eq!(first.message(), "Unexpected dot.");
}

#[test]
fn strict_lexer_returns_first_error() {
    let ctx = ctx();
    let err = Lexer::new("SELECT $", &ctx).strict(true).tokenize().unwrap_err();
    assert_eq!(err.message, "Unexpected character.");
    assert_eq!(err.ch, "$");
}

#[test]
fn strict_parser_returns_first_error() {
    let ctx = ctx();
    let err = Parser::new(&ctx)
        .strict(true)
        .parse("UPDATE t WHERE id = 3")
        .unwrap_err();
    assert!(matches!(&err, Error::Parse(e) if e.message == "Missing assignment in SET operation."));
}

#[test]
fn strict_parser_accepts_clean_input() {
    let ctx = ctx();
    let parsed = Parser::new(&ctx)
        .strict(true)
        .parse("SELECT a FROM t; SELECT b FROM u")
        .unwrap();
    assert_eq!(parsed.statements.len(), 2);
}

#[test]
fn unrecognized_statement_is_skipped() {
    let parsed = parse_any("FLUSH TABLES; SELECT 1");
    assert_eq!(messages(&parsed), vec!["Unrecognized statement type."]);
    assert_eq!(parsed.statements.len(), 1);
    assert_eq!(parsed.statements[0].keyword(), "SELECT");
}

#[test]
fn missing_delimiter_still_splits() {
    let parsed = parse_any("SELECT 1 SELECT 2");
    assert_eq!(
        messages(&parsed),
        vec!["A new statement was found, but no delimiter between it and the previous one."]
    );
    assert_eq!(parsed.statements.len(), 2);
}

#[test]
fn empty_clause_bodies_are_reported() {
    for sql in [
        "SELECT a FROM",
        "SELECT a FROM t WHERE",
        "SELECT a FROM t WHERE a = 1 ORDER BY",
        "SELECT a FROM t GROUP BY a HAVING",
        "UPDATE t SET a = 1 WHERE",
        "DELETE FROM t WHERE a = 1 ORDER BY",
        "SELECT a FROM t JOIN u ON",
    ] {
        let parsed = parse_any(sql);
        assert_eq!(messages(&parsed), vec!["An expression was expected."], "{sql}");
    }
    assert!(parse_any("DELETE FROM t").is_clean());
}

#[test]
fn dangling_offset_is_reported() {
    let parsed = parse_any("SELECT a FROM t LIMIT 1 OFFSET");
    assert_eq!(messages(&parsed), vec!["An offset was expected."]);
    let diagnostic = parsed.diagnostics().next().unwrap();
    assert_eq!(diagnostic.text(), "OFFSET");
}

#[test]
fn stray_bracket_stops_expression() {
    let ctx = ctx();
    let mut list = Lexer::new("(1))", &ctx).tokenize().unwrap().list;
    let mut parser = Parser::new(&ctx);
    let expr = Expression::parse(&mut parser, &mut list, &ParseOptions::default()).unwrap();
    assert_eq!(expr.expr, "(1)");
    let errors: Vec<_> = parser.errors().iter().map(|e| e.message.as_str()).collect();
    assert_eq!(errors, vec!["Unexpected bracket."]);
    assert!(list.get(list.idx).unwrap().is_operator(")"));
}

#[test]
fn empty_input_is_not_an_error() {
    let parsed = parse_any("");
    assert!(parsed.is_clean());
    assert!(parsed.statements.is_empty());

    let parsed = parse_any("  ;; -- nothing\n");
    assert!(parsed.is_clean());
    assert!(parsed.statements.is_empty());
}
