//! Runtime error types.
//!
//! `EvalErrorKind` is the structured category; factory functions below are
//! the public way to build an [`EvalError`], so call sites read as
//! `wrong_kind("len", "a list, map or string", &arg)`.

use keel_diagnostic::{Diagnostic, ErrorCode};
use keel_ir::{Name, Position};
use thiserror::Error;

use crate::Value;

fn arguments(expected: &str) -> String {
    let noun = if expected == "1" { "argument" } else { "arguments" };
    format!("{expected} {noun}")
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    // Pattern
    #[error("pattern {pattern} does not match {subject}")]
    PatternFailed { pattern: String, subject: String },
    #[error("matcher block must return a bool or a map, got {got}")]
    MatcherProtocol { got: &'static str },
    #[error("`{key}` is bound twice by one pattern")]
    DuplicateBinding { key: String },

    // Arguments
    #[error("`{name}` expects {}, got {got}", arguments(.expected))]
    ArityMismatch {
        name: String,
        expected: &'static str,
        got: usize,
    },
    #[error("`{name}` expects {expected}, got {got}")]
    WrongKind {
        name: String,
        expected: &'static str,
        got: &'static str,
    },
    #[error("{type_name} is not callable")]
    NotCallable { type_name: &'static str },
    #[error("division by zero")]
    DivisionByZero,

    // Access
    #[error("index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds { index: String, len: usize },
    #[error("key not found: {key}")]
    KeyNotFound { key: String },
    #[error("`{name}` is not bound")]
    Unbound { name: Name },
    #[error("duplicate key {key}")]
    DuplicateKey { key: String },

    // Resources
    #[error("maximum call depth exceeded (limit: {limit})")]
    DepthExceeded { limit: usize },

    // Scope
    #[error("`{name}` is already bound in this scope")]
    AlreadyBound { name: Name },
    #[error("binding keys must be atoms, got {got}")]
    BadBindingKey { got: String },

    #[error("internal runtime error: {message}")]
    Internal { message: String },
}

/// A runtime error, optionally positioned at the call that raised it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub position: Option<Position>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            position: None,
        }
    }

    /// Attach `position` unless a more precise one is already set.
    #[must_use]
    pub fn at(mut self, position: &Position) -> Self {
        if self.position.is_none() {
            self.position = Some(position.clone());
        }
        self
    }

    pub fn code(&self) -> ErrorCode {
        match &self.kind {
            EvalErrorKind::PatternFailed { .. } => ErrorCode::E3001,
            EvalErrorKind::MatcherProtocol { .. } => ErrorCode::E3002,
            EvalErrorKind::DuplicateBinding { .. } => ErrorCode::E3003,
            EvalErrorKind::ArityMismatch { .. } => ErrorCode::E6001,
            EvalErrorKind::WrongKind { .. } | EvalErrorKind::DuplicateKey { .. } => {
                ErrorCode::E6002
            }
            EvalErrorKind::NotCallable { .. } => ErrorCode::E6003,
            EvalErrorKind::DivisionByZero => ErrorCode::E6004,
            EvalErrorKind::IndexOutOfBounds { .. }
            | EvalErrorKind::KeyNotFound { .. }
            | EvalErrorKind::Unbound { .. } => ErrorCode::E6005,
            EvalErrorKind::DepthExceeded { .. } => ErrorCode::E6006,
            EvalErrorKind::AlreadyBound { .. } => ErrorCode::E6007,
            EvalErrorKind::BadBindingKey { .. } => ErrorCode::E6008,
            EvalErrorKind::Internal { .. } => ErrorCode::E9003,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self.kind, EvalErrorKind::Internal { .. })
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match &self.position {
            Some(pos) => diag.at(pos.clone()),
            None => diag,
        }
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

// Factory functions

#[cold]
pub fn pattern_failed(pattern: &Value, subject: &Value) -> EvalError {
    EvalErrorKind::PatternFailed {
        pattern: pattern.to_string(),
        subject: subject.to_string(),
    }
    .into()
}

#[cold]
pub fn matcher_protocol(got: &Value) -> EvalError {
    EvalErrorKind::MatcherProtocol {
        got: got.type_name(),
    }
    .into()
}

#[cold]
pub fn duplicate_binding(key: &Value) -> EvalError {
    EvalErrorKind::DuplicateBinding {
        key: key.to_string(),
    }
    .into()
}

/// `expected` is the accepted count as text: `"2"`, `"2 or 3"`, `"at least 1"`.
#[cold]
pub fn arity_mismatch(name: &str, expected: &'static str, got: usize) -> EvalError {
    EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    }
    .into()
}

#[cold]
pub fn wrong_kind(name: &str, expected: &'static str, got: &Value) -> EvalError {
    EvalErrorKind::WrongKind {
        name: name.to_string(),
        expected,
        got: got.type_name(),
    }
    .into()
}

#[cold]
pub fn not_callable(value: &Value) -> EvalError {
    EvalErrorKind::NotCallable {
        type_name: value.type_name(),
    }
    .into()
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalErrorKind::DivisionByZero.into()
}

#[cold]
pub fn index_out_of_bounds(index: &Value, len: usize) -> EvalError {
    EvalErrorKind::IndexOutOfBounds {
        index: index.to_string(),
        len,
    }
    .into()
}

#[cold]
pub fn key_not_found(key: &Value) -> EvalError {
    EvalErrorKind::KeyNotFound {
        key: key.to_string(),
    }
    .into()
}

#[cold]
pub fn unbound(name: &Name) -> EvalError {
    EvalErrorKind::Unbound { name: name.clone() }.into()
}

#[cold]
pub fn duplicate_key(key: &Value) -> EvalError {
    EvalErrorKind::DuplicateKey {
        key: key.to_string(),
    }
    .into()
}

#[cold]
pub fn depth_exceeded(limit: usize) -> EvalError {
    EvalErrorKind::DepthExceeded { limit }.into()
}

#[cold]
pub fn already_bound(name: &Name) -> EvalError {
    EvalErrorKind::AlreadyBound { name: name.clone() }.into()
}

#[cold]
pub fn bad_binding_key(key: &Value) -> EvalError {
    EvalErrorKind::BadBindingKey {
        got: key.to_string(),
    }
    .into()
}

#[cold]
pub fn internal(message: impl Into<String>) -> EvalError {
    EvalErrorKind::Internal {
        message: message.into(),
    }
    .into()
}
