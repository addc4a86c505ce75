//! Tests for dialect resolution and keyword classification.

mod common;
use common::*;

use sqlscan_core::{Context, Lexer, SqlMode, TokenFlags, TokenType};

#[test]
fn closest_version_of_same_family() {
    let ctx = Context::load_closest("MySql50712").unwrap();
    assert_eq!(ctx.name(), "MySql50700");
    assert!(Context::load("MySql50712").is_err());
}

#[test]
fn unknown_family_resolves_to_none() {
    assert!(Context::load_closest("Sqlite30000").is_none());
    assert!(Context::closest("Sqlite30000").is_none());
}

#[test]
fn mariadb_versions() {
    let ctx = Context::load_closest("MariaDb100605").unwrap();
    assert_eq!(ctx.name(), "MariaDb100600");
    assert_eq!(ctx.version_parts(), (10, 6, 0));
}

#[test]
fn primary_key_is_one_composed_token() {
    let lexed = lex("CREATE TABLE t (id INT, PRIMARY KEY (id), KEY k (id))");
    let keys: Vec<_> = lexed
        .list
        .tokens()
        .iter()
        .filter(|t| t.flags.contains(TokenFlags::KEYWORD_KEY))
        .collect();
    assert_eq!(keys.len(), 2);

    assert_eq!(keys[0].value_str(), "PRIMARY KEY");
    assert!(keys[0].flags.contains(
        TokenFlags::KEYWORD_RESERVED | TokenFlags::KEYWORD_COMPOSED | TokenFlags::KEYWORD_KEY
    ));
    assert_eq!(keys[1].value_str(), "KEY");
    assert!(!keys[1].flags.contains(TokenFlags::KEYWORD_COMPOSED));
}

#[test]
fn contexts_are_independent_values() {
    let ansi = Context::default().with_mode(SqlMode::parse("ANSI_QUOTES"));
    let plain = ctx();

    let lexed = Lexer::new("SELECT \"a\"", &ansi).tokenize().unwrap();
    assert_eq!(lexed.list.tokens()[2].kind, TokenType::Symbol);

    let lexed = Lexer::new("SELECT \"a\"", &plain).tokenize().unwrap();
    assert_eq!(lexed.list.tokens()[2].kind, TokenType::String);
}

#[test]
fn keyword_tables_follow_versions() {
    let old = Context::load("MySql50700").unwrap();
    let new = Context::load("MySql80000").unwrap();
    assert!(!old.is_keyword("WINDOW"));
    assert!(new.is_reserved("WINDOW"));

    let lexed = Lexer::new("SELECT window FROM t", &old).tokenize().unwrap();
    assert_eq!(lexed.list.tokens()[2].kind, TokenType::None);
}
