//! Clause extraction and substitution on parsed statements.
//!
//! Clauses are cut out of the original token stream rather than rebuilt
//! from the parse tree, so everything outside the addressed clauses keeps
//! its source text.

use serde::Serialize;

use crate::components::JoinType;
use crate::lexer::{TokenList, TokenType};
use crate::statements::{Statement, StatementKind};

/// Which part of a statement [`get_clause`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseSelector<'a> {
    /// The clause itself.
    Exact,
    /// Every clause before it.
    Before,
    /// Every clause after it.
    After,
    /// Every clause strictly between it and another clause.
    Between(&'a str),
}

/// Extracts part of `statement` from the token list it was parsed from.
///
/// With `skip_first`, an [`ClauseSelector::Exact`] extraction leaves out
/// the clause keyword itself. Comments are dropped and the result is
/// trimmed. Unknown clause names yield an empty string.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn get_clause(
    statement: &Statement,
    list: &TokenList,
    clause: &str,
    selector: ClauseSelector<'_>,
    skip_first: bool,
) -> String {
    let Some(target) = statement.clause_index(clause) else {
        return String::new();
    };
    let target = target as isize;
    let (lo, hi) = match selector {
        ClauseSelector::Exact => (target, target),
        ClauseSelector::Before => (isize::MIN, target - 1),
        ClauseSelector::After => (target + 1, isize::MAX),
        ClauseSelector::Between(other) => {
            let Some(other) = statement.clause_index(other) else {
                return String::new();
            };
            let other = other as isize;
            (target.min(other) + 1, target.max(other) - 1)
        }
    };

    let mut out = String::new();
    let mut current: isize = -1;
    let mut brackets = 0usize;
    let mut skipped = false;
    let mut drop_space = false;
    let end = (statement.last + 1).min(list.len());

    for token in &list.tokens()[statement.first.min(end)..end] {
        match token.kind {
            TokenType::Comment => {
                drop_space = out.ends_with(char::is_whitespace);
                continue;
            }
            TokenType::Whitespace if drop_space => {
                drop_space = false;
                continue;
            }
            _ => drop_space = false,
        }
        if token.is_operator("(") {
            brackets += 1;
        } else if token.is_operator(")") {
            brackets = brackets.saturating_sub(1);
        }

        let mut opens_clause = false;
        if brackets == 0 {
            if let Some(index) = token
                .keyword()
                .map(clause_name)
                .and_then(|name| statement.clause_index(name))
            {
                let index = index as isize;
                if index >= current {
                    current = index;
                    opens_clause = true;
                }
            }
        }

        if current < lo || current > hi {
            continue;
        }
        if skip_first && selector == ClauseSelector::Exact && opens_clause && !skipped {
            skipped = true;
            continue;
        }
        out.push_str(&token.token);
    }

    let out = out.trim().to_owned();
    tracing::debug!(clause, ?selector, len = out.len(), "clause extracted");
    out
}

/// Maps a keyword to the clause it opens.
fn clause_name(keyword: &str) -> &str {
    if JoinType::from_keyword(keyword).is_some() {
        return "JOIN";
    }
    match keyword {
        "REPLACE" => "INSERT",
        "VALUE" => "VALUES",
        other => other,
    }
}

/// Replaces one clause of `statement`.
///
/// `replacement` includes the clause keyword. With `only_keyword`, just
/// the keyword is replaced and the clause body is kept.
#[must_use]
pub fn replace_clause(
    statement: &Statement,
    list: &TokenList,
    clause: &str,
    replacement: &str,
    only_keyword: bool,
) -> String {
    if statement.clause_index(clause).is_none() {
        return list.build_range(statement.first..statement.last + 1);
    }
    let mut parts = vec![
        get_clause(statement, list, clause, ClauseSelector::Before, true),
        String::from(replacement),
    ];
    if only_keyword {
        parts.push(get_clause(statement, list, clause, ClauseSelector::Exact, true));
    }
    parts.push(get_clause(statement, list, clause, ClauseSelector::After, true));
    join_parts(&parts)
}

/// Replaces several clauses at once.
///
/// Replacements are applied in clause order; pairs naming clauses the
/// statement does not have are ignored.
#[must_use]
pub fn replace_clauses(statement: &Statement, list: &TokenList, ops: &[(&str, &str)]) -> String {
    let mut ops: Vec<_> = ops
        .iter()
        .filter_map(|(clause, new)| Some((statement.clause_index(clause)?, *clause, *new)))
        .collect();
    if ops.is_empty() {
        return list.build_range(statement.first..statement.last + 1);
    }
    ops.sort_by_key(|(index, _, _)| *index);

    let (_, first, _) = ops[0];
    let mut parts = vec![get_clause(statement, list, first, ClauseSelector::Before, true)];
    for (i, (_, clause, new)) in ops.iter().enumerate() {
        parts.push(String::from(*new));
        let rest = match ops.get(i + 1) {
            Some((_, next, _)) => ClauseSelector::Between(next),
            None => ClauseSelector::After,
        };
        parts.push(get_clause(statement, list, clause, rest, true));
    }
    join_parts(&parts)
}

fn join_parts(parts: &[String]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A summary of what a statement does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryFlags {
    /// The leading keyword.
    pub querytype: Option<&'static str>,
    pub is_select: bool,
    /// The statement changes rows.
    pub is_affected: bool,
    pub is_insert: bool,
    pub is_replace: bool,
    pub is_delete: bool,
    pub is_group: bool,
    pub is_count: bool,
    pub is_func: bool,
    pub distinct: bool,
    pub limit: bool,
    pub offset: bool,
    pub order: bool,
    pub join: bool,
    pub subquery: bool,
    pub union: bool,
    /// `INTO OUTFILE` or `INTO DUMPFILE`.
    pub is_export: bool,
    /// `PROCEDURE ANALYSE()`
    pub is_analyse: bool,
    /// The schema changes; cached structure should be reloaded.
    pub reload: bool,
}

/// Computes the flags of a parsed statement.
#[must_use]
pub fn get_flags(statement: &Statement) -> QueryFlags {
    let mut flags = QueryFlags {
        querytype: Some(statement.keyword()),
        ..QueryFlags::default()
    };

    match &statement.kind {
        StatementKind::Select(select) => {
            flags.is_select = true;
            flags.distinct = select.options.has("DISTINCT") || select.options.has("DISTINCTROW");
            flags.is_group = !select.group.is_empty() || !select.having.is_empty();
            flags.limit = select.limit.is_some();
            flags.offset = select.limit.as_ref().is_some_and(|l| l.offset.is_some());
            flags.order = !select.order.is_empty();
            flags.join = !select.join.is_empty();
            flags.union = !select.union.is_empty();
            flags.is_export = select.into.as_ref().is_some_and(|i| i.is_export());
            flags.is_analyse = select
                .procedure
                .as_ref()
                .and_then(|p| p.function.as_deref())
                .is_some_and(|f| f.eq_ignore_ascii_case("ANALYSE"));
            flags.subquery = select
                .expr
                .iter()
                .chain(select.from.iter())
                .any(|e| e.subquery.is_some());

            let function = |name: &str| {
                select
                    .expr
                    .iter()
                    .any(|e| e.function.as_deref().is_some_and(|f| f.eq_ignore_ascii_case(name)))
            };
            flags.is_count = function("COUNT");
            flags.is_func = !flags.is_count
                && select.expr.iter().any(|e| e.function.is_some());
        }
        StatementKind::Update(update) => {
            flags.is_affected = true;
            flags.limit = update.limit.is_some();
            flags.order = !update.order.is_empty();
            flags.join = !update.join.is_empty();
        }
        StatementKind::Delete(delete) => {
            flags.is_affected = true;
            flags.is_delete = true;
            flags.limit = delete.limit.is_some();
            flags.order = !delete.order.is_empty();
            flags.join = !delete.join.is_empty();
        }
        StatementKind::Insert(insert) => {
            flags.is_affected = true;
            flags.is_insert = !insert.replace;
            flags.is_replace = insert.replace;
            flags.subquery = insert.select.is_some();
        }
        StatementKind::Create(_) => flags.reload = true,
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::parser::{parse, Parsed};

    const QUERY: &str = "SELECT * FROM `sakila`.`film` \
        WHERE city_id < 1 ORDER BY city_id ASC LIMIT 0, 1 INTO OUTFILE \"/dev/null\"";

    fn parsed(sql: &str) -> Parsed {
        parse(sql, &Context::default())
    }

    #[test]
    fn test_exact_clause_skips_keyword() {
        let p = parsed(QUERY);
        let stmt = &p.statements[0];
        assert_eq!(
            get_clause(stmt, &p.list, "LIMIT", ClauseSelector::Exact, true),
            "0, 1 INTO OUTFILE \"/dev/null\""
        );
        assert_eq!(
            get_clause(stmt, &p.list, "WHERE", ClauseSelector::Exact, false),
            "WHERE city_id < 1"
        );
    }

    #[test]
    fn test_between_is_exclusive() {
        let p = parsed(QUERY);
        let stmt = &p.statements[0];
        assert_eq!(
            get_clause(stmt, &p.list, "FROM", ClauseSelector::Between("LIMIT"), true),
            "WHERE city_id < 1 ORDER BY city_id ASC"
        );
        assert_eq!(
            get_clause(stmt, &p.list, "LIMIT", ClauseSelector::Between("FROM"), true),
            "WHERE city_id < 1 ORDER BY city_id ASC"
        );
    }

    #[test]
    fn test_before_and_after() {
        let p = parsed(QUERY);
        let stmt = &p.statements[0];
        assert_eq!(
            get_clause(stmt, &p.list, "WHERE", ClauseSelector::Before, true),
            "SELECT * FROM `sakila`.`film`"
        );
        assert_eq!(
            get_clause(stmt, &p.list, "ORDER BY", ClauseSelector::After, true),
            "LIMIT 0, 1 INTO OUTFILE \"/dev/null\""
        );
    }

    #[test]
    fn test_subquery_keywords_do_not_move_clause() {
        let p = parsed("SELECT a FROM t WHERE a IN (SELECT b FROM u LIMIT 1) LIMIT 2");
        let stmt = &p.statements[0];
        assert_eq!(
            get_clause(stmt, &p.list, "WHERE", ClauseSelector::Exact, true),
            "a IN (SELECT b FROM u LIMIT 1)"
        );
    }

    #[test]
    fn test_unknown_clause() {
        let p = parsed("SELECT 1");
        let stmt = &p.statements[0];
        assert_eq!(get_clause(stmt, &p.list, "BOGUS", ClauseSelector::Exact, true), "");
        assert_eq!(replace_clause(stmt, &p.list, "BOGUS", "X", false), "SELECT 1");
    }

    #[test]
    fn test_replace_clause() {
        let p = parsed("SELECT a FROM t WHERE a = 1 LIMIT 5");
        let stmt = &p.statements[0];
        assert_eq!(
            replace_clause(stmt, &p.list, "LIMIT", "LIMIT 10, 20", false),
            "SELECT a FROM t WHERE a = 1 LIMIT 10, 20"
        );
        assert_eq!(
            replace_clause(stmt, &p.list, "WHERE", "HAVING", true),
            "SELECT a FROM t HAVING a = 1 LIMIT 5"
        );
    }

    #[test]
    fn test_replace_clauses_in_clause_order() {
        let p = parsed("SELECT a FROM t WHERE a = 1 ORDER BY a LIMIT 5");
        let stmt = &p.statements[0];
        assert_eq!(
            replace_clauses(
                stmt,
                &p.list,
                &[("LIMIT", "LIMIT 1"), ("WHERE", "WHERE b = 2")]
            ),
            "SELECT a FROM t WHERE b = 2 ORDER BY a LIMIT 1"
        );
    }

    #[test]
    fn test_flags() {
        let p = parsed(
            "SELECT DISTINCT COUNT(*) FROM a JOIN b USING (id) GROUP BY x ORDER BY x LIMIT 1, 2",
        );
        let flags = get_flags(&p.statements[0]);
        assert_eq!(flags.querytype, Some("SELECT"));
        assert!(flags.is_select && flags.distinct && flags.is_count && flags.is_group);
        assert!(flags.join && flags.order && flags.limit && flags.offset);
        assert!(!flags.is_func && !flags.union && !flags.is_affected);

        let p = parsed("REPLACE INTO t VALUES (1)");
        let flags = get_flags(&p.statements[0]);
        assert!(flags.is_affected && flags.is_replace && !flags.is_insert);
    }
}
