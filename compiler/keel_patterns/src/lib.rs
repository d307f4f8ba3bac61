#![allow(
    clippy::result_large_err,
    reason = "EvalError is returned on every call path; boxing it would touch every builtin"
)]
//! Keel runtime core.
//!
//! This crate provides:
//! - Runtime values (`Value`, `Heap`, `MapValue`, `BlockValue`, ...)
//! - The persistent [`Namespace`] that scopes are built from
//! - The structural pattern matcher ([`match_value`])
//! - Runtime errors ([`EvalError`]) and the [`Flow`]/[`Reply`] call result
//! - The print handler that `print` and `println` write to
//!
//! # Value Types
//!
//! All heap allocations go through `Value::` factory methods. The `Heap<T>`
//! wrapper has a private constructor, so the invariant holds crate-wide.
//! Values are single-threaded and reference counted with `Rc`.

mod context;
pub mod errors;
mod flow;
mod matcher;
mod namespace;
pub mod print_handler;
mod value;

pub use context::{EvalContext, DEFAULT_MAX_DEPTH};
pub use errors::{EvalError, EvalErrorKind};
pub use flow::{Flow, Reply};
pub use matcher::{match_value, MatchOutcome};
pub use namespace::{Iter as NamespaceIter, Namespace};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandlerImpl, SharedPrintHandler,
};
pub use value::{
    value_equals, BlockBody, BlockValue, CompiledBody, Heap, MapValue, MutCell, NativeFn,
    UniqueToken, Value,
};
