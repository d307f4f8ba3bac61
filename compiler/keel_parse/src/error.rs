use keel_diagnostic::{Diagnostic, ErrorCode};
use keel_ir::{Bracket, Name, Position, TokenKind};
use keel_lexer::LexError;
use thiserror::Error;

/// Where a misplaced operator sits in its run.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Misplacement {
    Leading,
    Trailing,
    Adjacent,
}

impl std::fmt::Display for Misplacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Misplacement::Leading => "cannot start an expression",
            Misplacement::Trailing => "is missing its right-hand operand",
            Misplacement::Adjacent => "cannot directly follow another operator",
        })
    }
}

/// A fatal parse error. There is no recovery; the first error aborts.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("unexpected {found}")]
    UnexpectedToken { pos: Position, found: TokenKind },
    #[error("expected a value, found {found}")]
    ExpectedValue { pos: Position, found: TokenKind },
    #[error("premature end of input inside `{}`", .open.open_char())]
    PrematureEnd { pos: Position, open: Bracket },
    #[error("unknown operator `{symbol}`")]
    UnknownOperator { pos: Position, symbol: Name },
    #[error("operator `{symbol}` {place}")]
    MisplacedOperator {
        pos: Position,
        symbol: Name,
        place: Misplacement,
    },
    #[error("can only call ident, block or call, not {found}")]
    NotCallable { pos: Position, found: &'static str },
    #[error("parentheses hold at most one statement")]
    MultipleStatements { pos: Position },
    #[error("operator `{symbol}` is assigned to more than one precedence band")]
    DuplicateOperator { symbol: Name },
    #[error("internal parser error: {message}")]
    Internal { pos: Position, message: &'static str },
}

impl ParseError {
    /// Source position, if the error has one. Precedence table errors do not.
    pub fn position(&self) -> Option<&Position> {
        match self {
            ParseError::Lex(err) => Some(err.position()),
            ParseError::UnexpectedToken { pos, .. }
            | ParseError::ExpectedValue { pos, .. }
            | ParseError::PrematureEnd { pos, .. }
            | ParseError::UnknownOperator { pos, .. }
            | ParseError::MisplacedOperator { pos, .. }
            | ParseError::NotCallable { pos, .. }
            | ParseError::MultipleStatements { pos }
            | ParseError::Internal { pos, .. } => Some(pos),
            ParseError::DuplicateOperator { .. } => None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ParseError::Lex(err) => err.code(),
            ParseError::UnexpectedToken { .. } => ErrorCode::E1001,
            ParseError::ExpectedValue { .. } => ErrorCode::E1002,
            ParseError::PrematureEnd { .. } => ErrorCode::E1003,
            ParseError::UnknownOperator { .. } => ErrorCode::E1004,
            ParseError::MisplacedOperator { .. } => ErrorCode::E1005,
            ParseError::NotCallable { .. } => ErrorCode::E1006,
            ParseError::MultipleStatements { .. } => ErrorCode::E1007,
            ParseError::DuplicateOperator { .. } => ErrorCode::E1008,
            ParseError::Internal { .. } => ErrorCode::E9002,
        }
    }

    pub fn is_internal(&self) -> bool {
        self.code().is_internal()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match self.position() {
            Some(pos) => diag.at(pos.clone()),
            None => diag,
        }
    }
}
