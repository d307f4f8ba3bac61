//! Structural pattern matching.
//!
//! A matcher is an ordinary value. Primitives match by equality, atoms bind,
//! blocks are predicates, and lists, maps and wrappers recurse.

use std::cell::RefCell;

use keel_stack::ensure_sufficient_stack;

use crate::errors::{duplicate_binding, matcher_protocol};
use crate::{EvalContext, EvalError, MapValue, Namespace, Value};

/// Result of matching a value against a matcher.
#[derive(Clone, Debug)]
pub enum MatchOutcome {
    Fail,
    /// Matched without binding anything.
    Pass,
    Bindings(MapValue),
}

impl MatchOutcome {
    #[inline]
    pub fn is_match(&self) -> bool {
        !matches!(self, MatchOutcome::Fail)
    }

    /// Bindings of a successful match, `None` for `Fail` and `Pass`.
    pub fn into_bindings(self) -> Option<MapValue> {
        match self {
            MatchOutcome::Bindings(map) => Some(map),
            MatchOutcome::Fail | MatchOutcome::Pass => None,
        }
    }

    /// The outcome as a runtime value: `false`, `true` or the bindings map.
    pub fn into_value(self) -> Value {
        match self {
            MatchOutcome::Fail => Value::Bool(false),
            MatchOutcome::Pass => Value::Bool(true),
            MatchOutcome::Bindings(map) => Value::map(map),
        }
    }

    /// Interpret what a matcher block returned.
    pub fn from_value(value: &Value) -> Result<Self, EvalError> {
        match value {
            Value::Bool(true) => Ok(MatchOutcome::Pass),
            Value::Bool(false) => Ok(MatchOutcome::Fail),
            Value::Map(map) => Ok(MatchOutcome::Bindings((**map).clone())),
            other => Err(matcher_protocol(other)),
        }
    }

    fn from_bool(matched: bool) -> Self {
        if matched {
            MatchOutcome::Pass
        } else {
            MatchOutcome::Fail
        }
    }
}

/// Cell pairs being matched further up. Meeting one again matches
/// without binding, so a cell that holds itself terminates.
type OpenCells = Vec<(*const RefCell<Value>, *const RefCell<Value>)>;

/// Bindings accumulated across the parts of a list or map matcher.
#[derive(Default)]
struct Merged(Option<MapValue>);

impl Merged {
    fn add(&mut self, outcome: MatchOutcome) -> Result<(), EvalError> {
        let Some(bindings) = outcome.into_bindings() else {
            return Ok(());
        };
        match &mut self.0 {
            None => self.0 = Some(bindings),
            Some(acc) => acc.merge(bindings).map_err(|key| duplicate_binding(&key))?,
        }
        Ok(())
    }

    fn finish(self) -> MatchOutcome {
        match self.0 {
            Some(bindings) => MatchOutcome::Bindings(bindings),
            None => MatchOutcome::Pass,
        }
    }
}

/// Match `subject` against `matcher`.
///
/// Errors come from matcher blocks (their own failures, or a result that is
/// neither a bool nor a map) and from two parts binding the same key.
#[tracing::instrument(level = "trace", skip_all)]
pub fn match_value(
    ctx: &EvalContext,
    matcher: &Value,
    subject: &Value,
) -> Result<MatchOutcome, EvalError> {
    match_inner(ctx, matcher, subject, &mut OpenCells::new())
}

fn match_inner(
    ctx: &EvalContext,
    matcher: &Value,
    subject: &Value,
    cells: &mut OpenCells,
) -> Result<MatchOutcome, EvalError> {
    ensure_sufficient_stack(|| match_step(ctx, matcher, subject, cells))
}

fn match_step(
    ctx: &EvalContext,
    matcher: &Value,
    subject: &Value,
    cells: &mut OpenCells,
) -> Result<MatchOutcome, EvalError> {
    match (matcher, subject) {
        (Value::Atom(name), _) => Ok(MatchOutcome::Bindings(MapValue::singleton(
            Value::Atom(name.clone()),
            subject.clone(),
        ))),
        (Value::Block(block), _) => {
            let reply = block.invoke(ctx, &Namespace::new(), vec![subject.clone()])?;
            MatchOutcome::from_value(reply.flow.value())
        }
        (Value::Unit | Value::Bool(_) | Value::Number(_) | Value::Str(_), _) => {
            Ok(MatchOutcome::from_bool(matcher.equals(subject)))
        }
        (Value::List(patterns), Value::List(items)) => {
            if patterns.len() != items.len() {
                return Ok(MatchOutcome::Fail);
            }
            let mut merged = Merged::default();
            for (pattern, item) in patterns.iter().zip(items.iter()) {
                let outcome = match_inner(ctx, pattern, item, cells)?;
                if !outcome.is_match() {
                    return Ok(MatchOutcome::Fail);
                }
                merged.add(outcome)?;
            }
            Ok(merged.finish())
        }
        (Value::Map(patterns), Value::Map(entries)) => {
            let mut merged = Merged::default();
            for (key, pattern) in patterns.iter() {
                let Some(item) = entries.get(key) else {
                    return Ok(MatchOutcome::Fail);
                };
                let outcome = match_inner(ctx, pattern, item, cells)?;
                if !outcome.is_match() {
                    return Ok(MatchOutcome::Fail);
                }
                merged.add(outcome)?;
            }
            Ok(merged.finish())
        }
        (Value::Mut(pattern), Value::Mut(cell)) => {
            let pair = (pattern.as_ptr(), cell.as_ptr());
            if cells.contains(&pair) {
                return Ok(MatchOutcome::Pass);
            }
            cells.push(pair);
            let outcome = match_inner(ctx, &pattern.load(), &cell.load(), cells);
            cells.pop();
            outcome
        }
        (Value::Return(pattern), Value::Return(inner)) => match_inner(ctx, pattern, inner, cells),
        (Value::Unique(_), _) => Ok(MatchOutcome::from_bool(matcher.equals(subject))),
        _ => Ok(MatchOutcome::Fail),
    }
}

#[cfg(test)]
mod tests;
