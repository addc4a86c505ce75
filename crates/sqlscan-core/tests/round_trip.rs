//! Tests for rebuilding parsed statements.

mod common;
use common::*;

#[test]
fn rebuild_select() {
    assert_eq!(
        round_trip(
            "SELECT DISTINCT a, b FROM t LEFT JOIN u ON t.id = u.id WHERE a > 1 \
             GROUP BY a WITH ROLLUP HAVING b < 2 ORDER BY a DESC LIMIT 10 FOR UPDATE"
        ),
        "SELECT DISTINCT a, b FROM t LEFT JOIN u ON t.id = u.id WHERE a > 1 \
         GROUP BY a WITH ROLLUP HAVING b < 2 ORDER BY a DESC LIMIT 10 FOR UPDATE"
    );
}

#[test]
fn rebuild_collapses_whitespace_and_comments() {
    assert_eq!(
        round_trip("SELECT a\n  FROM   t /* all rows */\nWHERE a   > 1"),
        "SELECT a FROM t WHERE a > 1"
    );
}

#[test]
fn rebuild_union() {
    assert_eq!(
        round_trip("SELECT 1 UNION ALL SELECT 2"),
        "SELECT 1 UNION ALL SELECT 2"
    );
}

#[test]
fn rebuild_update() {
    assert_eq!(
        round_trip("UPDATE LOW_PRIORITY t SET a = 1, b = b + 1 WHERE id = 3 ORDER BY id LIMIT 1"),
        "UPDATE LOW_PRIORITY t SET a = 1, b = b + 1 WHERE id = 3 ORDER BY id LIMIT 1"
    );
}

#[test]
fn rebuild_delete() {
    assert_eq!(
        round_trip("DELETE QUICK FROM t WHERE a = 1 ORDER BY a LIMIT 5"),
        "DELETE QUICK FROM t WHERE a = 1 ORDER BY a LIMIT 5"
    );
}

#[test]
fn rebuild_insert() {
    assert_eq!(
        round_trip("INSERT IGNORE INTO t (a, b) VALUES (1, 'x'), (2, 'y')"),
        "INSERT IGNORE INTO t (a, b) VALUES (1, 'x'), (2, 'y')"
    );
    assert_eq!(round_trip("REPLACE t SET a = 1"), "REPLACE INTO t SET a = 1");
}

#[test]
fn rebuild_create_table() {
    let sql = "CREATE TABLE IF NOT EXISTS `t` (`id` INT NOT NULL, PRIMARY KEY (`id`)) \
               ENGINE=InnoDB DEFAULT CHARSET=utf8";
    assert_eq!(round_trip(sql), sql);
}

#[test]
fn rebuild_several_statements() {
    assert_eq!(
        round_trip("SELECT 1;\nDELETE FROM t WHERE a = 1 ; UPDATE t SET a = 2"),
        "SELECT 1; DELETE FROM t WHERE a = 1; UPDATE t SET a = 2"
    );
}
