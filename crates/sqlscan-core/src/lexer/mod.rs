//! SQL Lexer/Tokenizer
//!
//! Turns SQL text into a [`TokenList`] classified against a
//! [`Context`](crate::context::Context). Whitespace and comments are kept
//! as tokens so the source can be rebuilt exactly.

mod error;
mod span;
mod token;
mod token_list;
mod tokenizer;

pub use error::LexError;
pub use span::Span;
pub(crate) use token::unquote;
pub use token::{Token, TokenFlags, TokenType, TokenValue};
pub use token_list::TokenList;
pub use tokenizer::{Lexed, Lexer};
