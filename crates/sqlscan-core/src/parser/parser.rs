//! SQL Parser implementation.

use super::error::ParseError;
use crate::context::Context;
use crate::error::{Diagnostic, Error};
use crate::lexer::{LexError, Lexer, Token, TokenList, TokenType};
use crate::statements::{
    CreateStatement, DeleteStatement, InsertStatement, SelectStatement, Statement, StatementKind,
    UpdateStatement,
};

/// Keywords that begin a statement.
pub(crate) const STATEMENT_KEYWORDS: &[&str] = &[
    "ALTER", "ANALYZE", "CALL", "CHECK", "CREATE", "DELETE", "DROP", "EXPLAIN", "GRANT", "INSERT",
    "LOAD", "OPTIMIZE", "RENAME", "REPLACE", "REVOKE", "SELECT", "SHOW", "TRUNCATE", "UPDATE",
    "USE",
];

/// Returns true if `token` can begin a statement.
pub(crate) fn is_statement_keyword(token: &Token) -> bool {
    token
        .keyword()
        .is_some_and(|kw| STATEMENT_KEYWORDS.contains(&kw))
}

/// The output of a parsing pass.
#[derive(Debug, Clone, Default)]
pub struct Parsed {
    /// The tokens every statement indexes into.
    pub list: TokenList,
    pub statements: Vec<Statement>,
    pub lex_errors: Vec<LexError>,
    pub errors: Vec<ParseError>,
}

impl Parsed {
    /// Lex diagnostics followed by parse diagnostics.
    pub fn diagnostics(&self) -> impl Iterator<Item = Diagnostic<'_>> {
        self.lex_errors
            .iter()
            .map(Diagnostic::Lex)
            .chain(self.errors.iter().map(Diagnostic::Parse))
    }

    /// Returns true if no diagnostic was raised.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.lex_errors.is_empty() && self.errors.is_empty()
    }

    /// Rebuilds every statement, separated by `;`.
    #[must_use]
    pub fn build(&self) -> String {
        self.statements
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// SQL Parser.
///
/// Owns the diagnostic sink that every component parser reports into.
pub struct Parser<'c> {
    context: &'c Context,
    strict: bool,
    halted: bool,
    errors: Vec<ParseError>,
}

impl<'c> Parser<'c> {
    /// Creates a new parser for the given context.
    #[must_use]
    pub const fn new(context: &'c Context) -> Self {
        Self {
            context,
            strict: false,
            halted: false,
            errors: Vec::new(),
        }
    }

    /// Makes the first diagnostic fatal.
    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub const fn context(&self) -> &'c Context {
        self.context
    }

    /// Returns true once a strict parser has raised an error.
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    /// Diagnostics raised so far.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Records a diagnostic.
    pub fn error(&mut self, message: impl Into<String>, token: Option<&Token>) {
        let err = ParseError::new(message, token);
        tracing::trace!(message = %err.message, position = err.position, "parse error");
        self.errors.push(err);
        if self.strict {
            self.halted = true;
        }
    }

    /// Lexes and parses `sql`.
    ///
    /// # Errors
    ///
    /// In strict mode, returns the first lex or parse diagnostic.
    pub fn parse(mut self, sql: &str) -> Result<Parsed, Error> {
        let lexed = Lexer::new(sql, self.context)
            .strict(self.strict)
            .tokenize()?;
        let mut list = lexed.list;
        let statements = self.parse_list(&mut list);

        if self.strict {
            if let Some(err) = self.errors.first() {
                return Err(err.clone().into());
            }
        }

        Ok(Parsed {
            list,
            statements,
            lex_errors: lexed.errors,
            errors: self.errors,
        })
    }

    /// Splits an already lexed list into statements.
    pub fn parse_list(&mut self, list: &mut TokenList) -> Vec<Statement> {
        let tokens = list.shared();
        let mut statements = Vec::new();

        while list.idx < tokens.len() && !self.halted {
            let token = &tokens[list.idx];
            if !token.is_significant()
                || matches!(token.kind, TokenType::Delimiter | TokenType::Label)
            {
                list.idx += 1;
                continue;
            }
            if token.is_keyword("DELIMITER") {
                // The lexer already applied it; skip up to the new delimiter.
                list.next_of_type(&[TokenType::Delimiter]);
                continue;
            }

            let first = list.idx;
            let Some(kind) = self.dispatch(list) else {
                self.error("Unrecognized statement type.", Some(token));
                list.next_of_type(&[TokenType::Delimiter]);
                continue;
            };

            let mut last = list.idx.saturating_sub(1).max(first);
            while last > first && !tokens[last].is_significant() {
                last -= 1;
            }
            tracing::debug!(
                statement = kind.keyword(),
                first,
                last,
                "statement parsed"
            );
            statements.push(Statement { first, last, kind });
        }

        statements
    }

    /// Picks a statement grammar by its leading keyword and runs it.
    fn dispatch(&mut self, list: &mut TokenList) -> Option<StatementKind> {
        let keyword = list.get(list.idx)?.keyword()?.to_owned();
        let kind = match keyword.as_str() {
            "SELECT" => StatementKind::Select(Box::new(SelectStatement::parse(self, list))),
            "UPDATE" => StatementKind::Update(UpdateStatement::parse(self, list)),
            "DELETE" => StatementKind::Delete(DeleteStatement::parse(self, list)),
            "INSERT" | "REPLACE" => StatementKind::Insert(InsertStatement::parse(self, list)),
            "CREATE" if CreateStatement::is_create_table(list) => {
                StatementKind::Create(CreateStatement::parse(self, list))
            }
            _ => return None,
        };
        Some(kind)
    }
}

/// Lexes and parses `sql` in a non-strict pass.
#[must_use]
pub fn parse(sql: &str, context: &Context) -> Parsed {
    // Non-strict passes never fail.
    Parser::new(context).parse(sql).unwrap_or_default()
}
