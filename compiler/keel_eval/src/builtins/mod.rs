//! Builtin block library.
//!
//! Every builtin is a [`NativeFn`] registered under its name in the
//! bootstrap namespace. The compiler resolves these names to direct
//! references, so user bindings never shadow them.

mod arith;
mod cells;
mod collections;
mod control;
mod io;

use keel_patterns::errors::{arity_mismatch, wrong_kind};
use keel_patterns::{BlockValue, EvalError, Namespace, NativeFn, Value};
use num_bigint::BigInt;

const BUILTINS: &[(&str, NativeFn)] = &[
    // Arithmetic and comparison
    ("+", arith::add),
    ("-", arith::sub),
    ("*", arith::mul),
    ("/", arith::div),
    ("%", arith::rem),
    ("==", arith::eq),
    ("!=", arith::ne),
    ("<", arith::lt),
    (">", arith::gt),
    ("<=", arith::le),
    (">=", arith::ge),
    ("not", arith::not),
    // Matching and control
    ("=", control::assign),
    ("def", control::def),
    ("matches", control::matches),
    ("if", control::if_),
    ("loop", control::loop_),
    ("return", control::return_),
    ("call", control::call),
    // Collections
    ("++", collections::concat),
    ("len", collections::len),
    ("append", collections::append),
    ("get", collections::get),
    ("put", collections::put),
    ("dict", collections::dict),
    // Cells
    ("mut", cells::new_mut),
    ("load", cells::load),
    ("set", cells::set),
    ("unique", cells::unique),
    // Output
    ("println", io::println),
    ("print", io::print),
    ("str", io::str),
];

/// Named constants resolved like builtins.
const CONSTANTS: &[(&str, bool)] = &[("true", true), ("false", false)];

/// The namespace of builtin blocks and constants, keyed by name.
pub fn bootstrap() -> Namespace<Value> {
    let blocks = BUILTINS
        .iter()
        .map(|(name, func)| (*name, Value::block(BlockValue::native(*name, *func))));
    let constants = CONSTANTS.iter().map(|(name, b)| (*name, Value::Bool(*b)));
    let mut ns = Namespace::new();
    for (name, value) in blocks.chain(constants) {
        // Names in both tables are distinct.
        if let Some(next) = ns.insert(name.into(), value) {
            ns = next;
        }
    }
    ns
}

/// Names of all builtin blocks, in registration order.
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|(name, _)| *name)
}

/// Exactly `N` arguments. A call written `f ()` passes a single unit, which
/// counts as no arguments when `N` is zero.
pub(crate) fn exactly<const N: usize>(name: &str, mut args: Vec<Value>) -> Result<[Value; N], EvalError> {
    if N == 0 && matches!(args.as_slice(), [Value::Unit]) {
        args.clear();
    }
    let got = args.len();
    <[Value; N]>::try_from(args).map_err(|_| {
        let expected = match N {
            0 => "0",
            1 => "1",
            2 => "2",
            3 => "3",
            _ => "a fixed number of",
        };
        arity_mismatch(name, expected, got)
    })
}

pub(crate) fn number<'v>(name: &str, value: &'v Value) -> Result<&'v BigInt, EvalError> {
    value
        .as_number()
        .ok_or_else(|| wrong_kind(name, "a number", value))
}

pub(crate) fn boolean(name: &str, value: &Value) -> Result<bool, EvalError> {
    value
        .as_bool()
        .ok_or_else(|| wrong_kind(name, "a bool", value))
}

pub(crate) fn block<'v>(name: &str, value: &'v Value) -> Result<&'v BlockValue, EvalError> {
    value
        .as_block()
        .ok_or_else(|| wrong_kind(name, "a block", value))
}
