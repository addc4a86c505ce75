//! SQL Parser
//!
//! A cooperative recursive descent parser. The [`Parser`] picks a
//! statement grammar by its first keyword; statements then hand the shared
//! token cursor to the component parsers in [`crate::components`].

mod error;
#[allow(clippy::module_inception)]
mod parser;

pub use error::ParseError;
pub(crate) use parser::is_statement_keyword;
pub use parser::{parse, Parsed, Parser};
