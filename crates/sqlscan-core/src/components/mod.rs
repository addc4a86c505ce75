//! Component parsers.
//!
//! Each component parses one grammar fragment from the shared
//! [`TokenList`](crate::lexer::TokenList) and leaves the cursor on the
//! first token it did not consume, so components chain without gaps.
//! Problems are reported to the [`Parser`](crate::parser::Parser) and
//! parsing continues with whatever structure could be recovered.

use crate::lexer::{Token, TokenList};
use crate::parser::Parser;

mod array_obj;
mod condition;
mod create_definition;
mod data_type;
mod expression;
mod expression_array;
mod into;
mod join;
mod key;
mod limit;
mod options_array;
mod order;
mod set_operation;

pub use array_obj::ArrayObj;
pub use condition::Condition;
pub use create_definition::CreateDefinition;
pub use data_type::DataType;
pub use expression::Expression;
pub use expression_array::ExpressionArray;
pub use into::{ExportOption, IntoKeyword, IntoTarget};
pub use join::{JoinKeyword, JoinType};
pub use key::{Key, KeyColumn, Reference};
pub use limit::Limit;
pub use options_array::{OptionKind, OptionSpec, OptionsArray, SqlOption};
pub use order::{OrderDirection, OrderKeyword};
pub use set_operation::SetOperation;

/// Which qualifier slot a bare name fills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldKind {
    /// `db.table.column`
    #[default]
    Column,
    /// `db.table`
    Table,
}

/// Options shared by the expression-like component parsers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// The slot the last name fills.
    pub field: FieldKind,
    /// Stop at the first token that proves an expression.
    pub parse_field: bool,
    /// Stop instead of reading an alias.
    pub break_on_alias: bool,
    /// Stop at any bracket.
    pub break_on_parentheses: bool,
    /// Aliases are not part of this grammar.
    pub no_alias: bool,
    /// The fragment sits inside brackets; a closing bracket ends it quietly.
    pub in_brackets: bool,
}

impl ParseOptions {
    /// Options for table references.
    #[must_use]
    pub fn table() -> Self {
        Self {
            field: FieldKind::Table,
            ..Self::default()
        }
    }
}

/// Backtick-quotes an identifier.
pub(crate) fn quote(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Appends `text` to `out`, separated by a single space.
pub(crate) fn push_part(out: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(text);
}

/// The first significant token at or after `from`.
pub(crate) fn next_significant(tokens: &[Token], from: usize) -> Option<&Token> {
    tokens.iter().skip(from).find(|t| t.is_significant())
}

/// Reports a clause keyword that is not followed by anything.
pub(crate) fn expect_body(parser: &mut Parser<'_>, list: &TokenList, empty: bool) {
    if empty {
        let at = list.get(list.idx).or_else(|| list.tokens().last());
        parser.error("An expression was expected.", at);
    }
}

/// Reads a bracketed fragment as written.
pub(crate) fn bracketed(parser: &mut Parser<'_>, list: &mut TokenList) -> String {
    let tokens = list.shared();
    let start = list.idx;
    if !tokens.get(start).is_some_and(|t| t.is_operator("(")) {
        parser.error("An opening bracket was expected.", tokens.get(start));
        return String::new();
    }
    let mut depth = 0usize;
    while let Some(token) = tokens.get(list.idx) {
        list.idx += 1;
        if token.is_operator("(") {
            depth += 1;
        } else if token.is_operator(")") {
            depth -= 1;
            if depth == 0 {
                return list.build_range(start..list.idx);
            }
        }
    }
    parser.error("A closing bracket was expected.", tokens.last());
    list.build_range(start..list.idx)
}
