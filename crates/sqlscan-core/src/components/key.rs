//! Index and constraint definitions inside `CREATE TABLE`.

use std::fmt;

use serde::Serialize;

use super::{quote, OptionSpec, OptionsArray};
use crate::lexer::{Token, TokenFlags, TokenList, TokenType};
use crate::parser::Parser;

const OPTIONS: &[OptionSpec] = &[
    OptionSpec::var("USING", 1),
    OptionSpec::var_eq("KEY_BLOCK_SIZE", 2),
    OptionSpec::var("WITH PARSER", 3),
    OptionSpec::var("COMMENT", 4),
    OptionSpec::flag("VISIBLE", 5),
    OptionSpec::flag("INVISIBLE", 5),
];

/// Actions allowed after `ON DELETE` and `ON UPDATE`.
const REFERENCE_ACTIONS: &[&str] = &["RESTRICT", "CASCADE", "SET NULL", "NO ACTION", "SET DEFAULT"];

/// A column of an index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyColumn {
    pub name: String,
    /// Prefix length, e.g. `10` in `name(10)`.
    pub length: Option<u32>,
    /// `ASC` or `DESC`.
    pub order: Option<String>,
}

impl fmt::Display for KeyColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&quote(&self.name))?;
        if let Some(length) = self.length {
            write!(f, "({length})")?;
        }
        if let Some(order) = &self.order {
            write!(f, " {order}")?;
        }
        Ok(())
    }
}

/// The target of a foreign key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub table: String,
    pub columns: Vec<String>,
    /// `FULL`, `PARTIAL` or `SIMPLE`.
    pub match_type: Option<String>,
    pub on_delete: Option<String>,
    pub on_update: Option<String>,
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns: Vec<_> = self.columns.iter().map(|c| quote(c)).collect();
        write!(f, "REFERENCES {} ({})", quote(&self.table), columns.join(", "))?;
        if let Some(m) = &self.match_type {
            write!(f, " MATCH {m}")?;
        }
        if let Some(action) = &self.on_delete {
            write!(f, " ON DELETE {action}")?;
        }
        if let Some(action) = &self.on_update {
            write!(f, " ON UPDATE {action}")?;
        }
        Ok(())
    }
}

/// An index or key definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Key {
    /// The defining keyword, e.g. `PRIMARY KEY` or `UNIQUE INDEX`.
    pub kind: String,
    pub name: Option<String>,
    pub columns: Vec<KeyColumn>,
    pub options: OptionsArray,
    pub references: Option<Reference>,
}

impl Key {
    /// Returns true if `token` can start a key definition.
    #[must_use]
    pub fn starts_at(token: &Token) -> bool {
        token.kind == TokenType::Keyword && token.flags.contains(TokenFlags::KEYWORD_KEY)
    }

    /// Parses a key definition starting at its defining keyword.
    pub fn parse(parser: &mut Parser<'_>, list: &mut TokenList) -> Self {
        let tokens = list.shared();
        let mut ret = Self::default();

        let Some(token) = list.next().cloned() else {
            return ret;
        };
        ret.kind = token.value_str().into_owned();
        if ret.kind == "UNIQUE" {
            // `UNIQUE` alone is short for `UNIQUE KEY`.
            ret.kind = String::from("UNIQUE KEY");
        }

        list.skip_insignificant();
        if let Some(t) = tokens.get(list.idx) {
            let named = match t.kind {
                TokenType::None | TokenType::Symbol => true,
                TokenType::Keyword => !t.is_reserved() && !t.is_keyword("USING"),
                _ => false,
            };
            if named {
                ret.name = Some(t.value_str().into_owned());
                list.idx += 1;
            }
        }

        ret.options = OptionsArray::parse(parser, list, OPTIONS);
        ret.columns = parse_columns(parser, list);
        let trailing = OptionsArray::parse(parser, list, OPTIONS);
        ret.options.merge(trailing);

        if ret.kind == "FOREIGN KEY" {
            list.skip_insignificant();
            if tokens.get(list.idx).is_some_and(|t| t.is_keyword("REFERENCES")) {
                list.idx += 1;
                ret.references = Some(parse_reference(parser, list));
            }
        }
        ret
    }
}

fn parse_columns(parser: &mut Parser<'_>, list: &mut TokenList) -> Vec<KeyColumn> {
    let tokens = list.shared();
    let mut columns = Vec::new();

    list.skip_insignificant();
    match tokens.get(list.idx) {
        Some(t) if t.is_operator("(") => list.idx += 1,
        other => {
            parser.error("An opening bracket was expected.", other);
            return columns;
        }
    }

    let mut column: Option<KeyColumn> = None;
    while let Some(token) = list.next().cloned() {
        if token.is_operator(")") {
            break;
        }
        if token.kind == TokenType::Delimiter {
            parser.error("A closing bracket was expected.", Some(&token));
            break;
        }
        if token.is_operator(",") {
            columns.extend(column.take());
            continue;
        }
        match column.as_mut() {
            None => {
                column = Some(KeyColumn {
                    name: token.value_str().into_owned(),
                    ..KeyColumn::default()
                });
            }
            Some(col) if token.is_operator("(") => {
                col.length = list.next().and_then(|t| t.value_str().parse().ok());
                list.next_of_type_and_value(TokenType::Operator, ")");
            }
            Some(col) if token.is_keyword("ASC") || token.is_keyword("DESC") => {
                col.order = token.keyword().map(String::from);
            }
            Some(_) => parser.error("Unexpected token.", Some(&token)),
        }
    }
    columns.extend(column);
    columns
}

fn parse_reference(parser: &mut Parser<'_>, list: &mut TokenList) -> Reference {
    let tokens = list.shared();
    let mut ret = Reference::default();

    if let Some(table) = list.next() {
        ret.table = table.value_str().into_owned();
    }
    ret.columns = parse_columns(parser, list)
        .into_iter()
        .map(|c| c.name)
        .collect();

    loop {
        list.skip_insignificant();
        let Some(token) = tokens.get(list.idx) else {
            break;
        };
        let slot = match token.keyword() {
            Some("MATCH") => &mut ret.match_type,
            Some("ON DELETE") => &mut ret.on_delete,
            Some("ON UPDATE") => &mut ret.on_update,
            _ => break,
        };
        list.idx += 1;
        *slot = read_action(list);
        if slot.is_none() {
            parser.error(
                format!("Value/Expression for the option {} was expected.", token.value_str()),
                Some(token),
            );
        }
    }
    ret
}

/// Reads a referential action, which may span two words.
fn read_action(list: &mut TokenList) -> Option<String> {
    let start = list.idx;
    let first = list.next()?.value_str().to_uppercase();
    if matches!(first.as_str(), "FULL" | "PARTIAL" | "SIMPLE") {
        return Some(first);
    }
    let after_first = list.idx;
    if let Some(second) = list.next() {
        let both = format!("{first} {}", second.value_str().to_uppercase());
        if REFERENCE_ACTIONS.contains(&both.as_str()) {
            return Some(both);
        }
    }
    list.idx = after_first;
    if REFERENCE_ACTIONS.contains(&first.as_str()) {
        return Some(first);
    }
    list.idx = start;
    None
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.kind)?;
        if let Some(name) = &self.name {
            write!(f, " {}", quote(name))?;
        }
        let columns: Vec<_> = self.columns.iter().map(ToString::to_string).collect();
        write!(f, " ({})", columns.join(", "))?;
        if !self.options.is_empty() {
            write!(f, " {}", self.options)?;
        }
        if let Some(reference) = &self.references {
            write!(f, " {reference}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::lexer::Lexer;

    fn parse(sql: &str) -> (Key, Vec<String>) {
        let ctx = Context::default();
        let mut list = Lexer::new(sql, &ctx).tokenize().unwrap().list;
        let mut parser = Parser::new(&ctx);
        let key = Key::parse(&mut parser, &mut list);
        let errors = parser.errors().iter().map(|e| e.message.clone()).collect();
        (key, errors)
    }

    #[test]
    fn test_primary_key() {
        let (key, errors) = parse("PRIMARY KEY (`id`)");
        assert!(errors.is_empty());
        assert_eq!(key.kind, "PRIMARY KEY");
        assert_eq!(key.columns.len(), 1);
        assert_eq!(key.to_string(), "PRIMARY KEY (`id`)");
    }

    #[test]
    fn test_named_index_with_options() {
        let (key, errors) = parse("UNIQUE idx_name USING BTREE (name(10) DESC, b) COMMENT 'x'");
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(key.kind, "UNIQUE KEY");
        assert_eq!(key.name.as_deref(), Some("idx_name"));
        assert_eq!(key.columns[0].length, Some(10));
        assert_eq!(key.columns[0].order.as_deref(), Some("DESC"));
        assert_eq!(
            key.to_string(),
            "UNIQUE KEY `idx_name` (`name`(10) DESC, `b`) USING BTREE COMMENT 'x'"
        );
    }

    #[test]
    fn test_foreign_key() {
        let (key, errors) =
            parse("FOREIGN KEY (a_id) REFERENCES a (id) ON DELETE SET NULL ON UPDATE CASCADE");
        assert!(errors.is_empty(), "{errors:?}");
        let reference = key.references.unwrap();
        assert_eq!(reference.table, "a");
        assert_eq!(reference.columns, vec!["id"]);
        assert_eq!(reference.on_delete.as_deref(), Some("SET NULL"));
        assert_eq!(reference.on_update.as_deref(), Some("CASCADE"));
    }
}
