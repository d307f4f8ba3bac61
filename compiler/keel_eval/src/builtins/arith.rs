//! Arithmetic, comparison and boolean builtins.

use std::cmp::Ordering;

use keel_patterns::errors::{division_by_zero, wrong_kind};
use keel_patterns::{EvalContext, EvalError, Namespace, Reply, Value};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;

use super::{boolean, exactly, number};

fn numbers(name: &str, args: Vec<Value>) -> Result<(BigInt, BigInt), EvalError> {
    let [a, b] = exactly(name, args)?;
    Ok((number(name, &a)?.clone(), number(name, &b)?.clone()))
}

/// `+`: number addition or string concatenation.
pub(super) fn add(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    let [a, b] = exactly("+", args)?;
    let sum = match (&a, &b) {
        (Value::Number(x), Value::Number(y)) => Value::number(&**x + &**y),
        (Value::Str(x), Value::Str(y)) => Value::string(format!("{}{}", &**x, &**y)),
        (Value::Number(_) | Value::Str(_), other) | (other, _) => {
            return Err(wrong_kind("+", "two numbers or two strings", other));
        }
    };
    Ok(Reply::value(sum))
}

pub(super) fn sub(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    let (a, b) = numbers("-", args)?;
    Ok(Reply::value(Value::number(a - b)))
}

pub(super) fn mul(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    let (a, b) = numbers("*", args)?;
    Ok(Reply::value(Value::number(a * b)))
}

/// `/`: quotient rounded toward negative infinity.
pub(super) fn div(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    let (a, b) = numbers("/", args)?;
    if b.is_zero() {
        return Err(division_by_zero());
    }
    Ok(Reply::value(Value::number(a.div_floor(&b))))
}

/// `%`: remainder with the sign of the divisor.
pub(super) fn rem(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    let (a, b) = numbers("%", args)?;
    if b.is_zero() {
        return Err(division_by_zero());
    }
    Ok(Reply::value(Value::number(a.mod_floor(&b))))
}

pub(super) fn eq(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    let [a, b] = exactly("==", args)?;
    Ok(Reply::value(Value::Bool(a.equals(&b))))
}

pub(super) fn ne(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    let [a, b] = exactly("!=", args)?;
    Ok(Reply::value(Value::Bool(!a.equals(&b))))
}

/// Order two numbers or two strings.
fn ordering(name: &str, args: Vec<Value>) -> Result<Ordering, EvalError> {
    let [a, b] = exactly(name, args)?;
    match (&a, &b) {
        (Value::Number(x), Value::Number(y)) => Ok((**x).cmp(&**y)),
        (Value::Str(x), Value::Str(y)) => Ok((**x).cmp(&**y)),
        (Value::Number(_) | Value::Str(_), other) | (other, _) => {
            Err(wrong_kind(name, "two numbers or two strings", other))
        }
    }
}

fn compare(name: &str, args: Vec<Value>, test: fn(Ordering) -> bool) -> Result<Reply, EvalError> {
    let ord = ordering(name, args)?;
    Ok(Reply::value(Value::Bool(test(ord))))
}

pub(super) fn lt(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    compare("<", args, Ordering::is_lt)
}

pub(super) fn gt(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    compare(">", args, Ordering::is_gt)
}

pub(super) fn le(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    compare("<=", args, Ordering::is_le)
}

pub(super) fn ge(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    compare(">=", args, Ordering::is_ge)
}

pub(super) fn not(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    let [b] = exactly("not", args)?;
    Ok(Reply::value(Value::Bool(!boolean("not", &b)?)))
}
