#![allow(
    clippy::result_large_err,
    reason = "EvalError is returned on every call path; boxing it would touch every builtin"
)]
//! Keel Eval - compiler and interpreter for Keel programs.
//!
//! # Architecture
//!
//! - `compile`: lowers the parsed syntax tree to [`Code`], resolving builtin
//!   names and the `args`/`recur` parameters once
//! - `exec`: walks [`Code`] under the namespace-threading convention, where
//!   every evaluation yields a value plus the bindings it introduced
//! - `builtins`: the native block library (arithmetic, matching, control
//!   flow, collections, cells, output)
//! - [`Interpreter`]: parse, compile and run a source file
//!
//! Values, namespaces and the matcher live in `keel_patterns`.

pub mod builtins;
mod compile;
mod errors;
mod exec;
mod interpreter;

pub use compile::{BlockCode, Code, CompiledProgram, Compiler, ARGS, RECUR};
pub use errors::RunError;
pub use interpreter::{Interpreter, InterpreterBuilder};

pub use keel_patterns::{
    buffer_handler, silent_handler, stdout_handler, EvalError, EvalErrorKind, SharedPrintHandler,
    Value, DEFAULT_MAX_DEPTH,
};
