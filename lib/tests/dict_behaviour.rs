//! Behavioural tests for `Dict`, written against the public API only.
//!
//! Grouped by concern: ordering, combination, default policies, batch
//! lookups and nested access.

#![allow(clippy::unwrap_used)]

use ordhash::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sym(s: &str) -> Value {
    Value::sym(s)
}

// =============================================================================
// ORDERING
// =============================================================================

mod ordering {
    use super::*;

    #[test]
    fn overwrite_keeps_original_slot() {
        let h = Dict::new().set("k1", 1).set("k2", 2);
        assert_eq!(h.keys().0, vec![&"k1", &"k2"]);

        let h = h.set("k1", 3);
        assert_eq!(h.keys().0, vec![&"k1", &"k2"]);
        assert_eq!(h.get(&"k1"), Some(&3));
    }

    #[test]
    fn state_table_grows_at_the_end() {
        let mut states = dict! {
            "Connecticut" => "CT",
            "Delaware" => "DE",
            "New Jersey" => "NJ",
            "Virginia" => "VA",
        };
        states.store("New York", "NY");
        states.store("New York", "NY");
        assert_eq!(states.len(), 5);
        assert_eq!(states.keys().last(), Some(&&"New York"));
    }

    #[test]
    fn reinserting_a_deleted_key_appends_it() {
        let mut h = Dict::from_pairs([(1, "one"), (2, "two"), (3, "three")]);
        h.delete(&1);
        h.store(1, "uno");
        assert_eq!(h.keys().0, vec![&2, &3, &1]);
    }

    #[test]
    fn clone_is_independent_but_shares_strings() {
        let original = Dict::new().set(1, str("shared"));
        let mut copy = original.clone();
        copy.store(2, str("extra"));
        assert_eq!(original.len(), 1);
        assert!(original.get(&1).unwrap().shares_with(copy.get(&1).unwrap()));
    }
}

// =============================================================================
// COMBINATION: update / merge / invert / replace / select / reject
// =============================================================================

mod combination {
    use super::*;

    fn h1() -> Dict<Value, Value> {
        dict! {
            sym("first") => Value::from("Joe"),
            sym("last") => Value::from("Leo"),
            sym("suffix") => Value::from("III"),
        }
    }

    fn h2() -> Dict<Value, Value> {
        dict! { sym("suffix") => Value::from("Jr.") }
    }

    #[test]
    fn update_takes_other_values() {
        init_logging();
        let original = h1();
        let other = h2();
        let mut h = h1();
        h.update(other.clone());

        for (k, v) in &other {
            assert_eq!(h.get(k), Some(v));
        }
        for (k, v) in &original {
            if !other.has_key(k) {
                assert_eq!(h.get(k), Some(v));
            }
        }
        assert_eq!(
            Value::from(h).to_string(),
            "{:first=>\"Joe\", :last=>\"Leo\", :suffix=>\"Jr.\"}"
        );
    }

    #[test]
    fn merge_matches_update_without_mutating() {
        let h = h1();
        let before = h.clone();
        let merged = h.merge(h2());

        for (k, v) in &before {
            assert_eq!(h.get(k), Some(v));
        }
        let mut updated = h1();
        updated.update(h2());
        assert_eq!(merged.to_pairs(), updated.to_pairs());
        assert_eq!(h.get(&sym("suffix")), Some(&Value::from("III")));
    }

    #[test]
    fn invert_round_trip_with_unique_values() {
        init_logging();
        let h = Dict::from_flat([1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(h.invert().invert(), h);
    }

    #[test]
    fn invert_keeps_last_key_for_shared_value() {
        let h = dict! { "a" => 0, "b" => 0, "c" => 1 };
        let inv = h.invert();
        assert_eq!(inv.get(&0), Some(&"b"));
        assert_eq!(inv.get(&1), Some(&"c"));
        assert_eq!(h.len(), 3);
    }

    #[test]
    fn replace_copies_order_from_other() {
        let mut h = dict! { 1 => "one", 2 => "two" };
        let other = dict! { 20 => "twenty", 10 => "ten" };
        h.replace(other.clone());
        assert_eq!(h.to_pairs(), other.to_pairs());
    }

    #[test]
    fn replace_takes_the_other_default_policy() {
        let mut h: Dict<&str, i64> = Dict::with_default(0);
        h.replace(Dict::with_default(-1).set("x", 1));
        assert_eq!(h.lookup(&"y"), Some(-1));

        h.replace(dict! { "z" => 26 });
        assert_eq!(h.lookup(&"y"), None);
    }

    #[test]
    fn select_reject_partition() {
        let h = Dict::from_flat([1, 2, 3, 4, 5, 6]).unwrap();
        let picked = h.select(|k, _| *k > 1);
        let dropped = h.reject(|k, _| *k > 1);
        assert_eq!(picked.len() + dropped.len(), h.len());
        assert_eq!(picked.keys().0, vec![&3, &5]);
        assert_eq!(dropped.keys().0, vec![&1]);
    }
}

// =============================================================================
// DEFAULT POLICIES
// =============================================================================

mod default_policies {
    use super::*;

    #[test]
    fn generator_without_persistence() {
        init_logging();
        let mut h: Dict<&str, i64> = Dict::with_default_fn(|_, _| 0);
        assert_eq!(h.fetch_default(&"n"), Ok(0));
        assert!(!h.has_key(&"n"));
        assert_eq!(h.len(), 0);
    }

    #[test]
    fn persisting_generator_grows_the_dict() {
        init_logging();
        let mut h: Dict<&str, Value> = Dict::new();
        h.set_default_policy(DefaultPolicy::persisting(|_| Value::from(0)));

        assert_eq!(h.lookup(&"jafar"), Some(Value::from(0)));
        assert_eq!(h.lookup(&"iago"), Some(Value::from(0)));
        h.store("aladdin", Value::from("jasmine"));

        assert!(h.has_key(&"jafar"));
        assert_eq!(h.len(), 3);
        assert_eq!(h.keys().0, vec![&"jafar", &"iago", &"aladdin"]);
    }

    #[test]
    fn generator_receives_the_container() {
        let mut h = Dict::<i64, i64>::with_default_fn(|d, k| d.len() as i64 * 100 + k);
        h.store(1, 1);
        assert_eq!(h.lookup(&7), Some(107));
    }

    #[test]
    fn plain_get_ignores_policy() {
        let h: Dict<&str, i64> = Dict::with_default(42);
        assert_eq!(h.get(&"missing"), None);
        assert_eq!(h.fetch_or(&"missing", -1), -1);
    }

    #[test]
    fn clearing_the_policy_restores_strictness() {
        let mut h: Dict<&str, i64> = Dict::with_default(1);
        assert_eq!(h.fetch_default(&"x"), Ok(1));
        assert!(h.clear_default_policy().is_some());
        assert_eq!(
            h.fetch_default(&"x"),
            Err(DictError::KeyNotFound {
                key: "\"x\"".to_string()
            })
        );
    }
}

// =============================================================================
// BATCH LOOKUPS
// =============================================================================

mod batch {
    use super::*;

    #[test]
    fn strict_batch_names_first_missing_key() {
        let h = dict! { "x" => 1 };
        let err = h.fetch_values(["x", "y"]).unwrap_err();
        assert_eq!(err, DictError::KeyNotFound { key: "\"y\"".into() });
    }

    #[test]
    fn substitutable_batch_fills_gaps() {
        let h = dict! {
            str("New Jersey") => str("NJ"),
            str("Connecticut") => str("CT"),
            str("Delaware") => str("DE"),
        };
        let keys = [str("New Jersey"), str("WYOMING")];
        let got = h.fetch_values_with(&keys, |k: &Str| k.capitalize());
        assert_eq!(got, List(vec![str("NJ"), str("Wyoming")]));
    }

    #[test]
    fn lenient_batch_marks_absence() {
        let h = dict! { "New Jersey" => "NJ", "Delaware" => "DE" };
        let got = h.values_at(["New Jersey", "Delaware", "Utah"]);
        assert_eq!(got.0, vec![Some(&"NJ"), Some(&"DE"), None]);
    }
}

// =============================================================================
// NESTED ACCESS
// =============================================================================

mod nested {
    use super::*;

    #[test]
    fn dig_follows_existing_path() {
        let h = dict! { sym("a") => Value::from(dict! { sym("b") => Value::from("c") }) };
        assert_eq!(h.dig(&[sym("a"), sym("b")]).unwrap(), Some(&Value::from("c")));
    }

    #[test]
    fn dig_missing_segment_is_absent() {
        let h = dict! { sym("a") => Value::from(dict! { sym("b") => Value::from("c") }) };
        assert_eq!(h.dig(&[sym("a"), sym("z")]).unwrap(), None);
    }

    #[test]
    fn dig_past_a_string_is_not_diggable() {
        let h = dict! { sym("a") => Value::from(dict! { sym("b") => Value::from("c") }) };
        let err = h.dig(&[sym("a"), sym("b"), sym("z")]).unwrap_err();
        assert!(matches!(err, DictError::NotDiggable { type_name: "str", .. }));
    }

    #[test]
    fn dig_past_a_stored_nil_is_absent() {
        let h = dict! { sym("a") => Value::Nil };
        assert_eq!(h.dig(&[sym("a"), sym("b")]), Ok(None));
    }

    #[test]
    fn dict_with_constant_default_nests_in_value() {
        let inner = Dict::<Value, Value>::with_default(Value::Nil).set(sym("b"), Value::from(2));
        let h = dict! { sym("a") => Value::from(inner) };
        assert_eq!(h.dig(&[sym("a"), sym("b")]).unwrap(), Some(&Value::from(2)));
    }
}
