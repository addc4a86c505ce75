//! Statement grammars.
//!
//! A statement parser is entered with the cursor on its leading keyword.
//! It runs component parsers clause by clause and returns once it meets a
//! delimiter or a token no clause accepts.

mod create;
mod delete;
mod insert;
mod select;
mod update;

use std::fmt;

use serde::Serialize;

pub use create::CreateStatement;
pub use delete::DeleteStatement;
pub use insert::InsertStatement;
pub use select::SelectStatement;
pub use update::UpdateStatement;

use crate::lexer::{TokenList, TokenType};
use crate::parser::{is_statement_keyword, Parser};

/// A parsed statement of any supported kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "body", rename_all = "snake_case")]
pub enum StatementKind {
    Select(Box<SelectStatement>),
    Update(UpdateStatement),
    Delete(DeleteStatement),
    Insert(InsertStatement),
    Create(CreateStatement),
}

impl StatementKind {
    /// The leading keyword.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Select(_) => "SELECT",
            Self::Update(_) => "UPDATE",
            Self::Delete(_) => "DELETE",
            Self::Insert(s) => s.keyword(),
            Self::Create(_) => "CREATE",
        }
    }

    /// Clause keywords in the order the statement accepts them.
    #[must_use]
    pub const fn clauses(&self) -> &'static [&'static str] {
        match self {
            Self::Select(_) => SelectStatement::CLAUSES,
            Self::Update(_) => UpdateStatement::CLAUSES,
            Self::Delete(_) => DeleteStatement::CLAUSES,
            Self::Insert(_) => InsertStatement::CLAUSES,
            Self::Create(_) => CreateStatement::CLAUSES,
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(s) => write!(f, "{s}"),
            Self::Update(s) => write!(f, "{s}"),
            Self::Delete(s) => write!(f, "{s}"),
            Self::Insert(s) => write!(f, "{s}"),
            Self::Create(s) => write!(f, "{s}"),
        }
    }
}

/// A statement with the token range it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    /// Index of the first token.
    pub first: usize,
    /// Index of the last significant token.
    pub last: usize,
    #[serde(flatten)]
    pub kind: StatementKind,
}

impl Statement {
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        self.kind.keyword()
    }

    #[must_use]
    pub const fn clauses(&self) -> &'static [&'static str] {
        self.kind.clauses()
    }

    /// The position of `clause` in the clause list.
    #[must_use]
    pub fn clause_index(&self, clause: &str) -> Option<usize> {
        self.clauses()
            .iter()
            .position(|c| c.eq_ignore_ascii_case(clause))
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

/// Handles a token no clause accepted.
///
/// Returns true if the statement ends here.
pub(crate) fn unexpected(parser: &mut Parser<'_>, list: &mut TokenList) -> bool {
    let Some(token) = list.get(list.idx).cloned() else {
        return true;
    };
    if token.kind == TokenType::Delimiter {
        return true;
    }
    if is_statement_keyword(&token) {
        parser.error(
            "A new statement was found, but no delimiter between it and the previous one.",
            Some(&token),
        );
        return true;
    }
    parser.error("Unexpected token.", Some(&token));
    list.idx += 1;
    parser.is_halted()
}
