use std::collections::BTreeSet;

use arbor::{AvlError, AvlMap, AvlTree};
use proptest::prelude::*;

mod common;

#[derive(Debug, Clone)]
enum Op {
    Insert(i16),
    Erase(i16),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-64i16..64).prop_map(Op::Insert),
        (-64i16..64).prop_map(Op::Erase),
    ]
}

proptest! {
    #[test]
    fn tree_matches_btreeset_and_stays_balanced(ops in proptest::collection::vec(op(), 0..200)) {
        common::init_tracing();
        let mut tree = AvlTree::new();
        let mut model = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(value) => {
                    let expected = if model.insert(value) { Ok(()) } else { Err(AvlError::DuplicateKey) };
                    prop_assert_eq!(tree.insert(value), expected);
                }
                Op::Erase(value) => {
                    let expected = if model.remove(&value) { Ok(value) } else { Err(AvlError::NotFound) };
                    prop_assert_eq!(tree.erase(&value), expected);
                }
            }

            prop_assert!(tree.validate().is_ok(), "invariant broken: {:?}", tree.validate());
            prop_assert!(tree.balance_factors().iter().all(|factor| (-1..=1).contains(factor)));
        }

        prop_assert_eq!(tree.len(), model.len());
        prop_assert!(tree.iter().eq(model.iter()), "in-order listing must match the model");
        prop_assert_eq!(tree.min(), model.first());
        prop_assert_eq!(tree.max(), model.last());
    }

    #[test]
    fn insert_then_find_then_erase(values in proptest::collection::btree_set(any::<i32>(), 1..64)) {
        let mut tree = AvlTree::new();
        for &value in &values {
            tree.insert(value).expect("distinct values insert");
            prop_assert_eq!(tree.find(&value), Some(&value));
        }
        for &value in &values {
            prop_assert_eq!(tree.erase(&value), Ok(value));
            prop_assert!(!tree.exists(&value));
        }
        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.height(), 0);
    }

    #[test]
    fn duplicate_insert_changes_nothing(
        values in proptest::collection::btree_set(0u32..1000, 1..64),
        pick in any::<prop::sample::Index>(),
    ) {
        let values: Vec<u32> = values.into_iter().collect();
        let mut tree = AvlTree::try_from_values(values.iter().copied()).expect("distinct values");
        let shape_before = tree.to_string();
        let factors_before = tree.balance_factors();

        let duplicate = values[pick.index(values.len())];
        prop_assert_eq!(tree.insert(duplicate), Err(AvlError::DuplicateKey));

        prop_assert_eq!(tree.to_string(), shape_before);
        prop_assert_eq!(tree.balance_factors(), factors_before);
        prop_assert_eq!(tree.len(), values.len());
    }

    #[test]
    fn height_is_logarithmic(values in proptest::collection::btree_set(any::<u64>(), 1..512)) {
        let tree = AvlTree::try_from_values(values.iter().copied()).expect("distinct values");
        // AVL bound: h < 1.4405 log2(n + 2)
        let bound = 1.4405 * ((values.len() + 2) as f64).log2();
        prop_assert!(f64::from(tree.height()) < bound, "height {} for {} values", tree.height(), values.len());
    }

    #[test]
    fn map_agrees_with_btreemap(entries in proptest::collection::vec((0u8..32, any::<u16>()), 0..64)) {
        let mut map = AvlMap::new();
        let mut model = std::collections::BTreeMap::new();
        for (key, value) in entries {
            let inserted = map.insert(key, value);
            if model.contains_key(&key) {
                prop_assert_eq!(inserted, Err(AvlError::DuplicateKey));
            } else {
                model.insert(key, value);
                prop_assert_eq!(inserted, Ok(()));
            }
        }
        prop_assert!(map.iter().eq(model.iter()));
        for key in 0u8..32 {
            prop_assert_eq!(map.get(&key), model.get(&key));
        }
    }
}
