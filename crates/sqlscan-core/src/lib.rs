//! # sqlscan-core
//!
//! A non-validating lexer and parser for MySQL and MariaDB queries.
//!
//! This crate provides:
//! - A context registry of per-version keyword and operator tables
//! - A lexer that never fails on malformed input and reports diagnostics
//! - Component parsers for conditions, expressions, keys, data types,
//!   options and joins that recover from errors
//! - Clause extraction and substitution on the original token stream
//!
//! ## Parsing
//!
//! ```rust
//! use sqlscan_core::{parse, Context};
//!
//! let ctx = Context::default();
//! let parsed = parse("SELECT a FROM t WHERE a > 1", &ctx);
//!
//! assert!(parsed.is_clean());
//! assert_eq!(parsed.build(), "SELECT a FROM t WHERE a > 1");
//! ```
//!
//! ## Rewriting clauses
//!
//! Clauses are cut from the token stream, so the rest of the query keeps
//! its source text:
//!
//! ```rust
//! use sqlscan_core::query::{get_clause, replace_clause, ClauseSelector};
//! use sqlscan_core::{parse, Context};
//!
//! let ctx = Context::default();
//! let parsed = parse("SELECT * FROM t /* keep */ WHERE a = 1 LIMIT 5", &ctx);
//! let stmt = &parsed.statements[0];
//!
//! assert_eq!(
//!     get_clause(stmt, &parsed.list, "LIMIT", ClauseSelector::Exact, true),
//!     "5"
//! );
//! assert_eq!(
//!     replace_clause(stmt, &parsed.list, "LIMIT", "LIMIT 10", false),
//!     "SELECT * FROM t WHERE a = 1 LIMIT 10"
//! );
//! ```

pub mod components;
pub mod context;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod query;
pub mod statements;

pub use context::{Context, Family, SqlMode};
pub use error::{Diagnostic, Error};
pub use lexer::{LexError, Lexer, Token, TokenFlags, TokenList, TokenType, TokenValue};
pub use parser::{parse, ParseError, Parsed, Parser};
pub use statements::{Statement, StatementKind};
