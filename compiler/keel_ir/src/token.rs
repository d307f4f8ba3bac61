//! Lexer output.

use std::fmt;

use num_bigint::BigInt;

use crate::{Name, Position};

/// The three bracket shapes. Each has an opening and a closing token.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Bracket {
    /// `(` `)`
    Paren,
    /// `{` `}`
    Brace,
    /// `[` `]`
    Square,
}

impl Bracket {
    pub fn open_char(self) -> char {
        match self {
            Bracket::Paren => '(',
            Bracket::Brace => '{',
            Bracket::Square => '[',
        }
    }

    pub fn close_char(self) -> char {
        match self {
            Bracket::Paren => ')',
            Bracket::Brace => '}',
            Bracket::Square => ']',
        }
    }
}

/// Token payload.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    /// Identifier: `println`, `x`, `_tmp`.
    Ref(Name),
    /// Atom literal `'foo`; the payload excludes the quote.
    Atom(Name),
    /// Maximal run of symbol characters: `+`, `==`, `|>`.
    Symbol(Name),
    /// Integer literal with separators stripped.
    Number(BigInt),
    /// String literal with escapes resolved.
    Str(String),
    Open(Bracket),
    Close(Bracket),
    /// Newline. Also synthesized once at end of input.
    Eol,
}

impl TokenKind {
    #[inline]
    pub fn is_eol(&self) -> bool {
        matches!(self, TokenKind::Eol)
    }

    #[inline]
    pub fn is_symbol(&self) -> bool {
        matches!(self, TokenKind::Symbol(_))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ref(name) => write!(f, "identifier `{name}`"),
            TokenKind::Atom(name) => write!(f, "atom `'{name}`"),
            TokenKind::Symbol(sym) => write!(f, "operator `{sym}`"),
            TokenKind::Number(n) => write!(f, "number `{n}`"),
            TokenKind::Str(_) => write!(f, "string literal"),
            TokenKind::Open(b) => write!(f, "`{}`", b.open_char()),
            TokenKind::Close(b) => write!(f, "`{}`", b.close_char()),
            TokenKind::Eol => write!(f, "end of line"),
        }
    }
}

/// A token with the position of its first character.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Position,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, pos: Position) -> Self {
        Token { kind, pos }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.pos)
    }
}
