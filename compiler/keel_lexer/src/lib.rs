//! Keel lexer.
//!
//! Turns source text into [`Token`](keel_ir::Token)s one at a time. The
//! parser drives it directly through [`Lexer::next_token`],
//! [`Lexer::peek_token`] and [`Lexer::unread_token`]; [`tokenize`] lexes a
//! whole file for the `keel lex` subcommand and for tests.
//!
//! Both the character cursor and the token cursor hold at most one pushed
//! back item. Pushing back twice, or before anything was read, is a
//! [`LexError::Internal`].

mod error;
mod lexer;

pub use error::LexError;
pub use lexer::{tokenize, Lexer};
