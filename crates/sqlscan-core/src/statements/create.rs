//! `CREATE TABLE` statements.

use std::fmt;

use serde::Serialize;

use super::{unexpected, SelectStatement};
use crate::components::{
    push_part, CreateDefinition, Expression, OptionSpec, OptionsArray, ParseOptions,
};
use crate::lexer::{TokenList, TokenType};
use crate::parser::Parser;

const TABLE_OPTIONS: &[OptionSpec] = &[
    OptionSpec::var_eq("ENGINE", 1),
    OptionSpec::var_eq("AUTO_INCREMENT", 2),
    OptionSpec::var_eq("AVG_ROW_LENGTH", 3),
    OptionSpec::var_eq("CHARACTER SET", 4),
    OptionSpec::var_eq("CHARSET", 4),
    OptionSpec::var_eq("DEFAULT CHARACTER SET", 4),
    OptionSpec::var_eq("DEFAULT CHARSET", 4),
    OptionSpec::var_eq("CHECKSUM", 5),
    OptionSpec::var_eq("COLLATE", 6),
    OptionSpec::var_eq("DEFAULT COLLATE", 6),
    OptionSpec::var_eq("COMMENT", 7),
    OptionSpec::var_eq("CONNECTION", 8),
    OptionSpec::var_eq("DATA DIRECTORY", 9),
    OptionSpec::var_eq("DELAY_KEY_WRITE", 10),
    OptionSpec::var_eq("INDEX DIRECTORY", 11),
    OptionSpec::var_eq("KEY_BLOCK_SIZE", 12),
    OptionSpec::var_eq("MAX_ROWS", 13),
    OptionSpec::var_eq("MIN_ROWS", 14),
    OptionSpec::var_eq("PACK_KEYS", 15),
    OptionSpec::var_eq("PASSWORD", 16),
    OptionSpec::var_eq("ROW_FORMAT", 17),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateStatement {
    pub temporary: bool,
    pub if_not_exists: bool,
    pub name: Option<Expression>,
    /// `CREATE TABLE a LIKE b`
    pub like: Option<Expression>,
    pub fields: Vec<CreateDefinition>,
    pub table_options: OptionsArray,
    /// `CREATE TABLE a [AS] SELECT ...`
    pub select: Option<Box<SelectStatement>>,
}

impl CreateStatement {
    pub const CLAUSES: &'static [&'static str] = &["CREATE", "TABLE"];

    /// Returns true if the cursor is on `CREATE [TEMPORARY] TABLE`.
    #[must_use]
    pub fn is_create_table(list: &TokenList) -> bool {
        let mut words = list.tokens()[list.idx.min(list.len())..]
            .iter()
            .filter(|t| t.is_significant())
            .skip(1);
        match words.next() {
            Some(t) if t.is_keyword("TEMPORARY") => {
                words.next().is_some_and(|t| t.is_keyword("TABLE"))
            }
            Some(t) => t.is_keyword("TABLE"),
            None => false,
        }
    }

    pub fn parse(parser: &mut Parser<'_>, list: &mut TokenList) -> Self {
        let tokens = list.shared();
        let mut ret = Self::default();
        let table = ParseOptions {
            break_on_parentheses: true,
            no_alias: true,
            ..ParseOptions::table()
        };

        list.skip_insignificant();
        list.idx += 1;
        list.skip_insignificant();
        if tokens.get(list.idx).is_some_and(|t| t.is_keyword("TEMPORARY")) {
            ret.temporary = true;
            list.idx += 1;
        }
        list.next_of_type_and_value(TokenType::Keyword, "TABLE");
        list.skip_insignificant();
        if tokens.get(list.idx).is_some_and(|t| t.is_keyword("IF NOT EXISTS")) {
            ret.if_not_exists = true;
            list.idx += 1;
        }
        ret.name = Expression::parse(parser, list, &table);
        if ret.name.is_none() {
            parser.error("The name of the entity was expected.", tokens.get(list.idx));
        }

        list.skip_insignificant();
        match tokens.get(list.idx) {
            Some(t) if t.is_keyword("LIKE") => {
                list.idx += 1;
                ret.like = Expression::parse(parser, list, &table);
            }
            Some(t) if t.is_operator("(") => {
                ret.fields = CreateDefinition::parse(parser, list);
            }
            _ => {}
        }
        ret.table_options = OptionsArray::parse(parser, list, TABLE_OPTIONS);

        while !parser.is_halted() {
            list.skip_insignificant();
            let Some(token) = tokens.get(list.idx) else {
                break;
            };
            if token.kind == TokenType::Delimiter {
                break;
            }
            if token.is_keyword("AS") {
                list.idx += 1;
                continue;
            }
            if token.is_keyword("SELECT") {
                ret.select = Some(Box::new(SelectStatement::parse(parser, list)));
                continue;
            }
            if unexpected(parser, list) {
                break;
            }
        }
        ret
    }
}

impl fmt::Display for CreateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::from("CREATE");
        if self.temporary {
            push_part(&mut out, "TEMPORARY");
        }
        push_part(&mut out, "TABLE");
        if self.if_not_exists {
            push_part(&mut out, "IF NOT EXISTS");
        }
        if let Some(name) = &self.name {
            push_part(&mut out, &name.to_string());
        }
        if let Some(like) = &self.like {
            push_part(&mut out, &format!("LIKE {like}"));
        }
        if !self.fields.is_empty() {
            let fields: Vec<_> = self.fields.iter().map(ToString::to_string).collect();
            push_part(&mut out, &format!("({})", fields.join(", ")));
        }
        push_part(&mut out, &self.table_options.to_string());
        if let Some(select) = &self.select {
            push_part(&mut out, &format!("AS {select}"));
        }
        f.write_str(&out)
    }
}
