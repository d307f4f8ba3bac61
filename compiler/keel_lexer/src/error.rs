use keel_diagnostic::{Diagnostic, ErrorCode};
use keel_ir::Position;
use thiserror::Error;

/// A fatal lexer error. Lexing never recovers; the first error aborts.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString { pos: Position },
    #[error("bare `'` must be followed by an identifier")]
    BareQuote { pos: Position },
    #[error("number literal `{text}` has a leading zero")]
    LeadingZero { pos: Position, text: String },
    #[error("number literal `{text}` ends with a `_` separator")]
    TrailingSeparator { pos: Position, text: String },
    #[error("unexpected character {found:?}")]
    InvalidChar { pos: Position, found: char },
    /// Pushback misuse or another broken lexer invariant.
    #[error("internal lexer error: {message}")]
    Internal { pos: Position, message: &'static str },
}

impl LexError {
    pub fn position(&self) -> &Position {
        match self {
            LexError::UnterminatedString { pos }
            | LexError::BareQuote { pos }
            | LexError::LeadingZero { pos, .. }
            | LexError::TrailingSeparator { pos, .. }
            | LexError::InvalidChar { pos, .. }
            | LexError::Internal { pos, .. } => pos,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            LexError::UnterminatedString { .. } => ErrorCode::E0001,
            LexError::InvalidChar { .. } => ErrorCode::E0002,
            LexError::LeadingZero { .. } | LexError::TrailingSeparator { .. } => ErrorCode::E0003,
            LexError::BareQuote { .. } => ErrorCode::E0004,
            LexError::Internal { .. } => ErrorCode::E9001,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, LexError::Internal { .. })
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.to_string())
            .at(self.position().clone())
    }
}
