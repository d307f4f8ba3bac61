//! Mutable cells and unique tokens.

use keel_patterns::errors::wrong_kind;
use keel_patterns::{EvalContext, EvalError, MutCell, Namespace, Reply, Value};

use super::exactly;

fn cell<'v>(name: &str, value: &'v Value) -> Result<&'v MutCell, EvalError> {
    match value {
        Value::Mut(cell) => Ok(cell),
        other => Err(wrong_kind(name, "a mut cell", other)),
    }
}

pub(super) fn new_mut(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    let [value] = exactly("mut", args)?;
    Ok(Reply::value(Value::new_mut(value)))
}

pub(super) fn load(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    let [target] = exactly("load", args)?;
    Ok(Reply::value(cell("load", &target)?.load()))
}

/// `set cell value`: overwrite, yielding the previous contents.
pub(super) fn set(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    let [target, value] = exactly("set", args)?;
    Ok(Reply::value(cell("set", &target)?.store(value)))
}

pub(super) fn unique(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    let [] = exactly("unique", args)?;
    Ok(Reply::value(Value::unique()))
}
