//! Column data types, e.g. `INT(10) UNSIGNED` or `ENUM('a', 'b')`.

use std::fmt;

use serde::Serialize;

use super::{ArrayObj, OptionSpec, OptionsArray};
use crate::context::{Context, SqlMode};
use crate::lexer::{TokenFlags, TokenList, TokenType};
use crate::parser::Parser;

const OPTIONS: &[OptionSpec] = &[
    OptionSpec::flag("BINARY", 1),
    OptionSpec::var("CHARACTER SET", 2),
    OptionSpec::var("CHARSET", 2),
    OptionSpec::var("COLLATE", 3),
    OptionSpec::flag("UNSIGNED", 4),
    OptionSpec::flag("ZEROFILL", 5),
];

/// A data type with its parameters and attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataType {
    /// The type name, uppercased.
    pub name: String,
    /// Parameters such as lengths, or the members of an `ENUM`/`SET`.
    pub parameters: Vec<String>,
    pub options: OptionsArray,
}

impl DataType {
    /// Parses a data type starting at the cursor.
    pub fn parse(parser: &mut Parser<'_>, list: &mut TokenList) -> Option<Self> {
        list.skip_insignificant();
        let token = list.get(list.idx)?.clone();
        if token.kind != TokenType::Keyword || !token.flags.contains(TokenFlags::KEYWORD_DATA_TYPE) {
            parser.error("Unrecognized data type.", Some(&token));
            return None;
        }
        list.idx += 1;

        let name = token.value_str().into_owned();
        let mut parameters = Vec::new();
        let mut after = list.idx;
        while list.get(after).is_some_and(|t| !t.is_significant()) {
            after += 1;
        }
        if list.get(after).is_some_and(|t| t.is_operator("(")) {
            list.idx = after;
            let array = ArrayObj::parse(parser, list);
            // Members keep their quotes so they print back unchanged.
            parameters = if matches!(name.as_str(), "ENUM" | "SET") {
                array.raw
            } else {
                array.values
            };
        }

        let options = OptionsArray::parse(parser, list, OPTIONS);
        Some(Self {
            name,
            parameters,
            options,
        })
    }

    /// The type name after applying the context's SQL mode.
    #[must_use]
    pub fn resolved_name(&self, context: &Context) -> &str {
        if self.name == "REAL" {
            if context.has_mode(SqlMode::REAL_AS_FLOAT) {
                return "FLOAT";
            }
            return "DOUBLE";
        }
        &self.name
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.parameters.is_empty() {
            write!(f, "({})", self.parameters.join(","))?;
        }
        if !self.options.is_empty() {
            write!(f, " {}", self.options)?;
        }
        Ok(())
    }
}
