//! Matching and control-flow builtins.

use keel_patterns::errors::{arity_mismatch, pattern_failed};
use keel_patterns::{
    match_value, EvalContext, EvalError, Flow, MatchOutcome, Namespace, Reply, Value,
};

use super::{block, boolean, exactly};

/// Match or fail, yielding the bindings alongside `value`.
fn bind(ctx: &EvalContext, name: &str, args: Vec<Value>) -> Result<Reply, EvalError> {
    let [pattern, value] = exactly(name, args)?;
    match match_value(ctx, &pattern, &value)? {
        MatchOutcome::Fail => Err(pattern_failed(&pattern, &value)),
        MatchOutcome::Pass => Ok(Reply::value(value)),
        MatchOutcome::Bindings(bindings) => Ok(Reply::with_bindings(bindings, value)),
    }
}

/// `pattern = value`
pub(super) fn assign(
    ctx: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    bind(ctx, "=", args)
}

/// `def pattern value`
pub(super) fn def(
    ctx: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    bind(ctx, "def", args)
}

/// `matches pattern value`: whether it matched, binding on success.
pub(super) fn matches(
    ctx: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    let [pattern, value] = exactly("matches", args)?;
    Ok(match match_value(ctx, &pattern, &value)? {
        MatchOutcome::Fail => Reply::value(Value::Bool(false)),
        MatchOutcome::Pass => Reply::value(Value::Bool(true)),
        MatchOutcome::Bindings(bindings) => Reply::with_bindings(bindings, Value::Bool(true)),
    })
}

/// `if cond then [else]`: invoke the chosen block and pass its reply through.
pub(super) fn if_(
    ctx: &EvalContext,
    caller: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    let got = args.len();
    let mut args = args.into_iter();
    let (Some(cond), Some(then), otherwise, None) = (args.next(), args.next(), args.next(), args.next())
    else {
        return Err(arity_mismatch("if", "2 or 3", got));
    };
    let branch = if boolean("if", &cond)? {
        then
    } else {
        match otherwise {
            Some(otherwise) => otherwise,
            None => return Ok(Reply::unit()),
        }
    };
    block("if", &branch)?.invoke(ctx, caller, Vec::new())
}

/// `loop body`: invoke `body` until it returns, yielding the returned value.
pub(super) fn loop_(
    ctx: &EvalContext,
    caller: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    let [body] = exactly("loop", args)?;
    let body = block("loop", &body)?;
    loop {
        if let Flow::Returning(value) = body.invoke(ctx, caller, Vec::new())?.flow {
            return Ok(Reply::value(value));
        }
    }
}

/// `return [value]`
pub(super) fn return_(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    let got = args.len();
    let mut args = args.into_iter();
    match (args.next(), args.next()) {
        (value, None) => Ok(Reply::returning(value.unwrap_or(Value::Unit))),
        (_, Some(_)) => Err(arity_mismatch("return", "0 or 1", got)),
    }
}

/// `call block args...`
pub(super) fn call(
    ctx: &EvalContext,
    caller: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    let mut args = args.into_iter();
    let Some(callee) = args.next() else {
        return Err(arity_mismatch("call", "at least 1", 0));
    };
    block("call", &callee)?.invoke(ctx, caller, args.collect())
}
