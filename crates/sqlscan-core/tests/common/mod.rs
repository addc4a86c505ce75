#![allow(dead_code)]

use sqlscan_core::lexer::Lexed;
use sqlscan_core::{Context, Lexer, Parsed, Statement};

pub fn ctx() -> Context {
    Context::default()
}

pub fn lex(sql: &str) -> Lexed {
    Lexer::new(sql, &ctx())
        .tokenize()
        .unwrap_or_else(|e| panic!("Non-strict lexing failed: {sql}\nError: {e:?}"))
}

/// Parses without checking diagnostics.
pub fn parse_any(sql: &str) -> Parsed {
    sqlscan_core::parse(sql, &ctx())
}

/// Parses and asserts that no diagnostic was raised.
pub fn parse(sql: &str) -> Parsed {
    let parsed = parse_any(sql);
    let messages = messages(&parsed);
    assert!(messages.is_empty(), "Diagnostics for: {sql}\n{messages:?}");
    parsed
}

pub fn parse_one(sql: &str) -> Statement {
    let mut parsed = parse(sql);
    assert_eq!(parsed.statements.len(), 1, "Expected one statement: {sql}");
    parsed.statements.remove(0)
}

/// Parses and rebuilds, checking that the rebuilt text is stable.
pub fn round_trip(sql: &str) -> String {
    let built = parse(sql).build();
    let rebuilt = parse(&built).build();
    assert_eq!(built, rebuilt, "Rebuild is not idempotent for: {sql}");
    built
}

pub fn messages(parsed: &Parsed) -> Vec<String> {
    parsed
        .diagnostics()
        .map(|d| d.message().to_owned())
        .collect()
}
