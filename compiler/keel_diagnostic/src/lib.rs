//! Diagnostic system for Keel error reporting.
//!
//! Every phase reports failures with an [`ErrorCode`] for searchability, a
//! message saying what went wrong, and the [`Position`](keel_ir::Position)
//! where it went wrong. Phase-specific error enums (`LexError`, `ParseError`,
//! `EvalError`) convert into a [`Diagnostic`]; emitters render them.
//!
//! Codes in the E9xxx range mark a violated invariant inside the compiler
//! itself rather than a mistake in the user's program, and are rendered with
//! a note saying so.

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::{ErrorCode, Phase};

#[cfg(test)]
mod tests;
