use keel_diagnostic::{Diagnostic, ErrorCode};
use keel_parse::ParseError;
use keel_patterns::EvalError;
use thiserror::Error;

/// Anything that stops a run: a lex or parse error before execution, or a
/// runtime error during it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RunError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl RunError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RunError::Parse(e) => e.code(),
            RunError::Eval(e) => e.code(),
        }
    }

    pub fn is_internal(&self) -> bool {
        match self {
            RunError::Parse(e) => e.is_internal(),
            RunError::Eval(e) => e.is_internal(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            RunError::Parse(e) => e.to_diagnostic(),
            RunError::Eval(e) => e.to_diagnostic(),
        }
    }
}
