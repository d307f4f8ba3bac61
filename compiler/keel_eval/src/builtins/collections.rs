//! List, map and string builtins. All of them return new values; the
//! arguments are never modified.

use keel_patterns::errors::{
    arity_mismatch, duplicate_key, index_out_of_bounds, key_not_found, wrong_kind,
};
use keel_patterns::{EvalContext, EvalError, MapValue, Namespace, Reply, Value};
use num_traits::ToPrimitive;

use super::{exactly, number};

/// `++`: concatenate two lists.
pub(super) fn concat(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    let [a, b] = exactly("++", args)?;
    let (Some(a), Some(b)) = (a.as_list(), b.as_list()) else {
        let offender = if a.as_list().is_some() { &b } else { &a };
        return Err(wrong_kind("++", "two lists", offender));
    };
    Ok(Reply::value(Value::list(a.iter().chain(b).cloned().collect())))
}

pub(super) fn len(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    let [value] = exactly("len", args)?;
    let n = match &value {
        Value::List(items) => items.len(),
        Value::Map(map) => map.len(),
        Value::Str(s) => s.chars().count(),
        other => return Err(wrong_kind("len", "a list, map or string", other)),
    };
    Ok(Reply::value(Value::number(n)))
}

/// `append list item`
pub(super) fn append(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    let [list, item] = exactly("append", args)?;
    let Some(items) = list.as_list() else {
        return Err(wrong_kind("append", "a list", &list));
    };
    let mut items = items.to_vec();
    items.push(item);
    Ok(Reply::value(Value::list(items)))
}

/// `get list index` or `get map key`
pub(super) fn get(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    let [container, key] = exactly("get", args)?;
    let found = match &container {
        Value::List(items) => {
            let index = number("get", &key)?;
            index
                .to_usize()
                .and_then(|i| items.get(i))
                .ok_or_else(|| index_out_of_bounds(&key, items.len()))?
        }
        Value::Map(map) => map.get(&key).ok_or_else(|| key_not_found(&key))?,
        other => return Err(wrong_kind("get", "a list or map", other)),
    };
    Ok(Reply::value(found.clone()))
}

/// `put map key value`
pub(super) fn put(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    let [map, key, value] = exactly("put", args)?;
    let Value::Map(entries) = &map else {
        return Err(wrong_kind("put", "a map", &map));
    };
    let mut entries = (**entries).clone();
    entries.put(key, value);
    Ok(Reply::value(Value::map(entries)))
}

/// `dict k1 v1 k2 v2 ...`
pub(super) fn dict(
    _: &EvalContext,
    _: &Namespace<Value>,
    args: Vec<Value>,
) -> Result<Reply, EvalError> {
    if args.len() % 2 != 0 {
        return Err(arity_mismatch("dict", "an even number of", args.len()));
    }
    let mut map = MapValue::new();
    let mut args = args.into_iter();
    while let (Some(key), Some(value)) = (args.next(), args.next()) {
        map.insert_new(key, value).map_err(|key| duplicate_key(&key))?;
    }
    Ok(Reply::value(Value::map(map)))
}
