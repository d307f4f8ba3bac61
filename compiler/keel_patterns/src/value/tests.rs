#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;

use super::*;
use crate::{EvalContext, EvalError, Reply};

fn noop(_: &EvalContext, _: &crate::Namespace<Value>, _: Vec<Value>) -> Result<Reply, EvalError> {
    Ok(Reply::unit())
}

fn list(items: &[i64]) -> Value {
    Value::list(items.iter().copied().map(Value::from).collect())
}

fn map(entries: &[(&str, i64)]) -> Value {
    Value::map(
        entries
            .iter()
            .map(|(k, v)| (Value::atom(*k), Value::from(*v)))
            .collect(),
    )
}

/// A cell whose contents are the cell itself.
fn self_holding() -> Value {
    let value = Value::new_mut(Value::Unit);
    if let Value::Mut(cell) = &value {
        cell.store(value.clone());
    }
    value
}

mod equality {
    use super::*;

    #[test]
    fn primitives_compare_by_value() {
        assert!(Value::Unit.equals(&Value::Unit));
        assert!(Value::from(true).equals(&Value::from(true)));
        assert!(!Value::from(true).equals(&Value::from(false)));
        assert!(Value::from(42).equals(&Value::from(42)));
        assert!(Value::from("a").equals(&Value::from("a")));
        assert!(Value::atom("x").equals(&Value::atom("x")));
        assert!(!Value::atom("x").equals(&Value::atom("y")));
    }

    #[test]
    fn different_kinds_are_unequal() {
        assert!(!Value::from(1).equals(&Value::from("1")));
        assert!(!Value::atom("a").equals(&Value::from("a")));
        assert!(!Value::Unit.equals(&Value::from(false)));
        assert!(!list(&[]).equals(&map(&[])));
    }

    #[test]
    fn lists_compare_pairwise() {
        assert!(list(&[1, 2, 3]).equals(&list(&[1, 2, 3])));
        assert!(!list(&[1, 2, 3]).equals(&list(&[1, 2])));
        assert!(!list(&[1, 2, 3]).equals(&list(&[1, 2, 4])));
    }

    #[test]
    fn maps_ignore_order() {
        assert!(map(&[("a", 1), ("b", 2)]).equals(&map(&[("b", 2), ("a", 1)])));
        assert!(!map(&[("a", 1), ("b", 2)]).equals(&map(&[("a", 1)])));
        assert!(!map(&[("a", 1)]).equals(&map(&[("a", 2)])));
    }

    #[test]
    fn blocks_never_equal() {
        let block = Value::block(BlockValue::native("noop", noop));
        assert!(!block.equals(&block));
        assert!(!block.equals(&block.clone()));
    }

    #[test]
    fn unique_by_identity() {
        let a = Value::unique();
        let b = Value::unique();
        assert!(a.equals(&a.clone()));
        assert!(!a.equals(&b));
    }

    #[test]
    fn wrappers_compare_contents() {
        assert!(Value::new_mut(Value::from(1)).equals(&Value::new_mut(Value::from(1))));
        assert!(!Value::new_mut(Value::from(1)).equals(&Value::new_mut(Value::from(2))));
        assert!(Value::returning(Value::from(1)).equals(&Value::returning(Value::from(1))));
        assert!(!Value::returning(Value::from(1)).equals(&Value::from(1)));
    }

    #[test]
    fn deeply_nested_lists_compare() {
        let mut a = Value::Unit;
        let mut b = Value::Unit;
        for _ in 0..50_000 {
            a = Value::list(vec![a]);
            b = Value::list(vec![b]);
        }
        assert!(a.equals(&b));
    }

    #[test]
    fn cells_holding_themselves_compare_equal() {
        let (a, b) = (self_holding(), self_holding());
        assert!(a.equals(&b));
        assert!(a.equals(&a.clone()));
        assert!(!a.equals(&Value::new_mut(Value::from(1))));
    }
}

mod teardown {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn deep_list_drops() {
        let mut value = Value::Unit;
        for _ in 0..200_000 {
            value = Value::list(vec![value]);
        }
        drop(value);
    }

    #[test]
    fn deep_mixed_wrappers_drop() {
        let mut value = Value::from(0);
        for i in 0..150_000 {
            value = match i % 3 {
                0 => Value::returning(value),
                1 => Value::new_mut(value),
                _ => Value::map(MapValue::singleton(Value::atom("k"), value)),
            };
        }
        drop(value);
    }

    #[test]
    fn shared_tail_survives_outer_drop() {
        let mut tail = Value::Unit;
        for _ in 0..1_000 {
            tail = Value::list(vec![tail]);
        }
        let outer = Value::list(vec![tail.clone(), Value::from(1)]);
        drop(outer);
        let mut depth = 0;
        let mut cur = tail;
        while let Some(items) = cur.as_list() {
            let next = items[0].clone();
            cur = next;
            depth += 1;
        }
        assert_eq!(depth, 1_000);
    }
}

mod cells {
    use super::*;

    #[test]
    fn mut_clones_share_the_cell() {
        let cell = Value::new_mut(Value::from(1));
        let alias = cell.clone();
        let (Value::Mut(a), Value::Mut(b)) = (&cell, &alias) else {
            panic!("expected mut cells");
        };
        let old = a.store(Value::from(2));
        assert!(old.equals(&Value::from(1)));
        assert!(b.load().equals(&Value::from(2)));
        assert!(MutCell::ptr_eq(a, b));
    }
}

mod display {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn display_forms() {
        assert_eq!(Value::Unit.to_string(), "()");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(-42).to_string(), "-42");
        assert_eq!(Value::from("hi").to_string(), "\"hi\"");
        assert_eq!(Value::atom("foo").to_string(), "'foo");
        assert_eq!(list(&[1, 2, 3]).to_string(), "[1 2 3]");
        assert_eq!(map(&[("a", 1), ("b", 2)]).to_string(), "{'a: 1, 'b: 2}");
        assert_eq!(Value::new_mut(Value::from(1)).to_string(), "mut(1)");
        assert_eq!(Value::returning(Value::from(9)).to_string(), "return(9)");
        assert_eq!(Value::unique().to_string(), "<unique>");
        assert_eq!(
            Value::block(BlockValue::native("noop", noop)).to_string(),
            "<builtin noop>"
        );
    }

    #[test]
    fn self_holding_cell_prints_once() {
        let cell = self_holding();
        assert_eq!(cell.to_string(), "mut(mut(...))");
        assert_eq!(format!("{cell:?}"), "Mut(Mut(...))");
        let list = Value::list(vec![cell.clone(), cell]);
        assert_eq!(list.to_string(), "[mut(mut(...)) mut(mut(...))]");
    }

    #[test]
    fn deep_list_displays() {
        let mut value = Value::Unit;
        for _ in 0..50_000 {
            value = Value::list(vec![value]);
        }
        let text = value.to_string();
        assert_eq!(text.len(), 100_002);
        assert!(text.starts_with("[[[") && text.ends_with("()]]]"));
    }

    #[test]
    fn display_value_unquotes_top_level_strings() {
        assert_eq!(Value::from("hi").display_value(), "hi");
        assert_eq!(
            Value::list(vec![Value::from("hi")]).display_value(),
            "[\"hi\"]"
        );
        assert_eq!(Value::from(7).display_value(), "7");
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::Unit.type_name(), "unit");
        assert_eq!(Value::from(1).type_name(), "number");
        assert_eq!(Value::from("s").type_name(), "string");
        assert_eq!(list(&[]).type_name(), "list");
        assert_eq!(map(&[]).type_name(), "map");
    }
}

mod maps {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn insert_new_rejects_duplicates() {
        let mut m = MapValue::new();
        m.insert_new(Value::atom("a"), Value::from(1)).unwrap();
        let rejected = m.insert_new(Value::atom("a"), Value::from(2)).unwrap_err();
        assert!(rejected.equals(&Value::atom("a")));
        assert_eq!(m.len(), 1);
        assert!(m.get(&Value::atom("a")).unwrap().equals(&Value::from(1)));
    }

    #[test]
    fn put_replaces_in_place() {
        let mut m = MapValue::new();
        m.put(Value::from(1), Value::from("one"));
        m.put(Value::from(2), Value::from("two"));
        m.put(Value::from(1), Value::from("uno"));
        let keys: Vec<String> = m.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["1", "2"]);
        assert!(m.get(&Value::from(1)).unwrap().equals(&Value::from("uno")));
    }

    #[test]
    fn merge_reports_collision() {
        let mut a = MapValue::singleton(Value::atom("x"), Value::from(1));
        let b = MapValue::singleton(Value::atom("x"), Value::from(2));
        let key = a.merge(b).unwrap_err();
        assert!(key.equals(&Value::atom("x")));
    }
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Unit),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::string),
        "[a-z]{1,6}".prop_map(|s| Value::atom(s.as_str())),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::list),
            proptest::collection::vec(("[a-z]{1,3}", inner.clone()), 0..4).prop_map(|entries| {
                Value::map(
                    entries
                        .into_iter()
                        .map(|(k, v)| (Value::atom(k.as_str()), v))
                        .collect(),
                )
            }),
            inner.prop_map(Value::new_mut),
        ]
    })
}

proptest! {
    #[test]
    fn equality_is_reflexive(value in arb_value()) {
        prop_assert!(value.equals(&value));
    }

    #[test]
    fn map_equality_is_permutation_invariant(
        entries in proptest::collection::btree_map("[a-z]{1,3}", any::<i64>(), 0..8),
        shift in 0usize..8,
    ) {
        let pairs: Vec<(Value, Value)> = entries
            .iter()
            .map(|(k, v)| (Value::atom(k.as_str()), Value::from(*v)))
            .collect();
        let mut rotated = pairs.clone();
        if !rotated.is_empty() {
            let by = shift % rotated.len();
            rotated.rotate_left(by);
        }
        rotated.reverse();
        let a = Value::map(pairs.into_iter().collect());
        let b = Value::map(rotated.into_iter().collect());
        prop_assert!(a.equals(&b));
        prop_assert!(b.equals(&a));
    }
}
