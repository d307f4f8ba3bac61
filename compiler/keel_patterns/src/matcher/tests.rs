#![allow(clippy::unwrap_used, clippy::expect_used)]

use num_bigint::BigInt;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::{silent_handler, BlockValue, EvalErrorKind, Reply, DEFAULT_MAX_DEPTH};

fn ctx() -> EvalContext {
    EvalContext::new(silent_handler(), DEFAULT_MAX_DEPTH)
}

fn run(matcher: &Value, subject: &Value) -> MatchOutcome {
    match_value(&ctx(), matcher, subject).unwrap()
}

fn bindings(outcome: MatchOutcome) -> Vec<(String, String)> {
    outcome
        .into_bindings()
        .expect("expected bindings")
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn is_even(_: &EvalContext, _: &Namespace<Value>, args: Vec<Value>) -> Result<Reply, EvalError> {
    let even = args
        .first()
        .and_then(Value::as_number)
        .is_some_and(|n| n % 2u32 == BigInt::from(0u32));
    Ok(Reply::value(Value::Bool(even)))
}

fn bind_seen(_: &EvalContext, _: &Namespace<Value>, args: Vec<Value>) -> Result<Reply, EvalError> {
    let subject = args.into_iter().next().unwrap_or(Value::Unit);
    Ok(Reply::value(Value::map(MapValue::singleton(
        Value::atom("seen"),
        subject,
    ))))
}

fn returns_number(_: &EvalContext, _: &Namespace<Value>, _: Vec<Value>) -> Result<Reply, EvalError> {
    Ok(Reply::value(Value::from(1)))
}

fn block(name: &str, func: crate::NativeFn) -> Value {
    Value::block(BlockValue::native(name, func))
}

#[test]
fn primitives_match_by_equality() {
    assert!(matches!(run(&Value::from(42), &Value::from(42)), MatchOutcome::Pass));
    assert!(matches!(run(&Value::from(42), &Value::from(43)), MatchOutcome::Fail));
    assert!(matches!(run(&Value::from("a"), &Value::from("a")), MatchOutcome::Pass));
    assert!(matches!(run(&Value::Unit, &Value::Unit), MatchOutcome::Pass));
    assert!(matches!(run(&Value::from(true), &Value::from(1)), MatchOutcome::Fail));
}

#[test]
fn atom_binds_subject() {
    let outcome = run(&Value::atom("foo"), &Value::from(42));
    assert_eq!(bindings(outcome), pairs(&[("'foo", "42")]));
}

#[test]
fn list_matches_elementwise_and_merges() {
    let matcher = Value::list(vec![Value::atom("a"), Value::from(2), Value::atom("b")]);
    let subject = Value::list(vec![Value::from(1), Value::from(2), Value::from(3)]);
    assert_eq!(
        bindings(run(&matcher, &subject)),
        pairs(&[("'a", "1"), ("'b", "3")])
    );
}

#[test]
fn list_length_mismatch_fails() {
    let matcher = Value::list(vec![Value::atom("a"), Value::atom("b")]);
    let subject = Value::list(vec![Value::from(1)]);
    assert!(!run(&matcher, &subject).is_match());
}

#[test]
fn list_without_bindings_passes() {
    let matcher = Value::list(vec![Value::from(1)]);
    let subject = Value::list(vec![Value::from(1)]);
    assert!(matches!(run(&matcher, &subject), MatchOutcome::Pass));
}

#[test]
fn list_element_failure_fails_whole_match() {
    let matcher = Value::list(vec![Value::atom("a"), Value::from(9)]);
    let subject = Value::list(vec![Value::from(1), Value::from(2)]);
    assert!(!run(&matcher, &subject).is_match());
}

#[test]
fn repeated_binding_is_an_error() {
    let matcher = Value::list(vec![Value::atom("a"), Value::atom("a")]);
    let subject = Value::list(vec![Value::from(1), Value::from(2)]);
    let err = match_value(&ctx(), &matcher, &subject).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::DuplicateBinding { .. }));
}

#[test]
fn map_matches_listed_keys_only() {
    let matcher = Value::map(MapValue::singleton(Value::from("k"), Value::atom("v")));
    let mut entries = MapValue::new();
    entries.put(Value::from("k"), Value::from(1));
    entries.put(Value::from("extra"), Value::from(2));
    let subject = Value::map(entries);
    assert_eq!(bindings(run(&matcher, &subject)), pairs(&[("'v", "1")]));
}

#[test]
fn map_missing_key_fails() {
    let matcher = Value::map(MapValue::singleton(Value::from("k"), Value::atom("v")));
    let subject = Value::map(MapValue::singleton(Value::from("other"), Value::from(1)));
    assert!(!run(&matcher, &subject).is_match());
}

#[test]
fn wrappers_unwrap_both_sides() {
    let matcher = Value::new_mut(Value::atom("x"));
    let subject = Value::new_mut(Value::from(5));
    assert_eq!(bindings(run(&matcher, &subject)), pairs(&[("'x", "5")]));

    let matcher = Value::returning(Value::atom("x"));
    assert!(!run(&matcher, &Value::from(5)).is_match());
}

#[test]
fn unique_matches_only_itself() {
    let token = Value::unique();
    assert!(run(&token, &token.clone()).is_match());
    assert!(!run(&token, &Value::unique()).is_match());
}

#[test]
fn incompatible_subject_fails() {
    let matcher = Value::list(vec![]);
    assert!(!run(&matcher, &Value::from(1)).is_match());
    assert!(!run(&matcher, &block("even", is_even)).is_match());
}

#[test]
fn block_matcher_is_a_predicate() {
    let even = block("even", is_even);
    assert!(matches!(run(&even, &Value::from(4)), MatchOutcome::Pass));
    assert!(matches!(run(&even, &Value::from(3)), MatchOutcome::Fail));
}

#[test]
fn block_matcher_may_return_bindings() {
    let seen = block("seen", bind_seen);
    assert_eq!(bindings(run(&seen, &Value::from(7))), pairs(&[("'seen", "7")]));
}

#[test]
fn block_matcher_must_return_bool_or_map() {
    let bad = block("bad", returns_number);
    let err = match_value(&ctx(), &bad, &Value::Unit).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::MatcherProtocol { got: "number" });
}

#[test]
fn outcome_as_value() {
    assert_eq!(MatchOutcome::Fail.into_value().to_string(), "false");
    assert_eq!(MatchOutcome::Pass.into_value().to_string(), "true");
}

/// A cell whose contents are the cell itself.
fn self_holding() -> Value {
    let value = Value::new_mut(Value::Unit);
    if let Value::Mut(cell) = &value {
        cell.store(value.clone());
    }
    value
}

#[test]
fn cyclic_cells_match_without_looping() {
    let (a, b) = (self_holding(), self_holding());
    assert!(matches!(run(&a, &b), MatchOutcome::Pass));
    assert!(!run(&a, &Value::new_mut(Value::from(1))).is_match());
}

proptest! {
    #[test]
    fn atom_matches_anything(name in "[a-z]{1,8}", n in any::<i64>(), s in "[a-z ]{0,8}") {
        for subject in [Value::from(n), Value::string(s.clone()), Value::Unit] {
            let outcome = run(&Value::atom(name.as_str()), &subject);
            let map = outcome.into_bindings().unwrap();
            prop_assert_eq!(map.len(), 1);
            prop_assert!(map.get(&Value::atom(name.as_str())).unwrap().equals(&subject));
        }
    }

    #[test]
    fn list_length_mismatch_never_matches(a in 0usize..6, b in 0usize..6) {
        prop_assume!(a != b);
        let matcher = Value::list((0..a).map(|i| Value::atom(format!("v{i}"))).collect());
        let subject = Value::list((0..b).map(|_| Value::Unit).collect());
        prop_assert!(!run(&matcher, &subject).is_match());
    }
}
