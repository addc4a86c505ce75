//! Tests for clause extraction, substitution and query flags.

mod common;
use common::*;

use sqlscan_core::query::{get_clause, get_flags, replace_clause, replace_clauses, ClauseSelector};

const OUTFILE: &str = "SELECT * FROM `sakila`.`film` WHERE city_id < 1 \
    ORDER BY city_id ASC LIMIT 0, 1 INTO OUTFILE \"/dev/null\"";

#[test]
fn limit_clause_runs_to_the_end() {
    let parsed = parse(OUTFILE);
    let stmt = &parsed.statements[0];
    assert_eq!(
        get_clause(stmt, &parsed.list, "LIMIT", ClauseSelector::Exact, true),
        "0, 1 INTO OUTFILE \"/dev/null\""
    );
}

#[test]
fn between_from_and_limit() {
    let parsed = parse(OUTFILE);
    let stmt = &parsed.statements[0];
    assert_eq!(
        get_clause(stmt, &parsed.list, "FROM", ClauseSelector::Between("LIMIT"), true),
        "WHERE city_id < 1 ORDER BY city_id ASC"
    );
}

#[test]
fn clause_names_are_case_insensitive() {
    let parsed = parse("SELECT a FROM t ORDER BY a");
    let stmt = &parsed.statements[0];
    assert_eq!(
        get_clause(stmt, &parsed.list, "order by", ClauseSelector::Exact, true),
        "a"
    );
}

#[test]
fn clause_of_second_statement() {
    let parsed = parse("SELECT 1; UPDATE t SET a = 1 WHERE b = 2 LIMIT 3");
    let stmt = &parsed.statements[1];
    assert_eq!(stmt.keyword(), "UPDATE");
    assert_eq!(
        get_clause(stmt, &parsed.list, "WHERE", ClauseSelector::Exact, true),
        "b = 2"
    );
    assert_eq!(
        get_clause(stmt, &parsed.list, "SET", ClauseSelector::Before, true),
        "UPDATE t"
    );
}

#[test]
fn join_keywords_belong_to_join_clause() {
    let parsed = parse("SELECT * FROM a LEFT JOIN b ON a.id = b.id WHERE a.x = 1");
    let stmt = &parsed.statements[0];
    assert_eq!(
        get_clause(stmt, &parsed.list, "JOIN", ClauseSelector::Exact, false),
        "LEFT JOIN b ON a.id = b.id"
    );
}

#[test]
fn comments_are_dropped() {
    let parsed = parse("SELECT * FROM t /* keep */ WHERE a = 1 LIMIT 5");
    let stmt = &parsed.statements[0];
    assert_eq!(
        get_clause(stmt, &parsed.list, "LIMIT", ClauseSelector::Before, true),
        "SELECT * FROM t WHERE a = 1"
    );
}

#[test]
fn replace_keeps_the_rest_verbatim() {
    let parsed = parse("SELECT a,b FROM t WHERE a = 1 LIMIT 5");
    let stmt = &parsed.statements[0];
    assert_eq!(
        replace_clause(stmt, &parsed.list, "WHERE", "WHERE a = 2", false),
        "SELECT a,b FROM t WHERE a = 2 LIMIT 5"
    );
}

#[test]
fn replace_several_clauses() {
    let parsed = parse("DELETE FROM t WHERE a = 1 ORDER BY a LIMIT 5");
    let stmt = &parsed.statements[0];
    assert_eq!(
        replace_clauses(
            stmt,
            &parsed.list,
            &[("LIMIT", "LIMIT 1"), ("BOGUS", "X"), ("WHERE", "WHERE a > 0")]
        ),
        "DELETE FROM t WHERE a > 0 ORDER BY a LIMIT 1"
    );
}

#[test]
fn flags_of_statements() {
    let flags = get_flags(&parse_one("SELECT x.b FROM (SELECT b FROM u) AS x"));
    assert!(flags.is_select && flags.subquery);

    let flags = get_flags(&parse_one("SELECT 1 UNION SELECT 2"));
    assert!(flags.union);

    let flags = get_flags(&parse_one("UPDATE t SET a = 1"));
    assert_eq!(flags.querytype, Some("UPDATE"));
    assert!(flags.is_affected && !flags.is_select);

    let flags = get_flags(&parse_one("DELETE FROM t"));
    assert!(flags.is_affected && flags.is_delete);

    let flags = get_flags(&parse_one("CREATE TABLE t (a INT)"));
    assert!(flags.reload);
}
