//! Keel IR - shared syntax types
//!
//! This crate contains the data structures handed between the phases of the
//! Keel compiler:
//! - [`Position`] for source locations (path, line, column)
//! - [`Name`] for identifiers, atoms and operator symbols
//! - [`Token`] / [`TokenKind`] for lexer output
//! - [`Expr`] / [`ExprKind`] / [`Program`] for parser output
//!
//! Every token and every syntax node carries the position it came from so
//! that every later phase can report errors against the source.

mod ast;
mod name;
mod position;
mod token;

pub use ast::{Expr, ExprKind, Program};
pub use name::Name;
pub use position::Position;
pub use token::{Bracket, Token, TokenKind};

#[cfg(test)]
mod tests;
