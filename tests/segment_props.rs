use arbor::{Combiner, Max, Min, SegmentTree, SegmentTreeError, Sum};
use proptest::prelude::*;

mod common;
use common::{naive_fold, padded_len};

/// Leaf vectors whose length is a power of two (1..=64).
fn leaves() -> impl Strategy<Value = Vec<i64>> {
    (0u32..=6).prop_flat_map(|exp| proptest::collection::vec(-1_000i64..1_000, 1usize << exp))
}

/// Every internal slot must equal the fold of its two children.
fn assert_internal_nodes<C: Combiner<i64>>(tree: &SegmentTree<i64, C>) -> Result<(), TestCaseError> {
    let data = tree.as_slice();
    for i in 0..tree.len() - 1 {
        let expected = tree.combiner().combine(&data[2 * i + 1], &data[2 * i + 2]);
        prop_assert_eq!(data[i], expected, "slot {} is stale", i);
    }
    Ok(())
}

proptest! {
    #[test]
    fn range_fold_matches_naive_fold(values in leaves(), a in any::<prop::sample::Index>(), b in any::<prop::sample::Index>()) {
        common::init_tracing();
        let (start, end) = {
            let (x, y) = (a.index(values.len()), b.index(values.len()));
            (x.min(y), x.max(y))
        };

        let mins = SegmentTree::new(values.clone(), Min).expect("power of two");
        let sums = SegmentTree::new(values.clone(), Sum).expect("power of two");
        let maxs = SegmentTree::new(values.clone(), Max).expect("power of two");

        let window: Vec<i64> = (start..=end)
            .map(|i| *mins.get(i).expect("index in range"))
            .collect();

        prop_assert_eq!(mins.range_fold(start, end).ok(), naive_fold(&window, |x, y| *x.min(y)));
        prop_assert_eq!(sums.range_fold(start, end).ok(), naive_fold(&window, |x, y| x + y));
        prop_assert_eq!(maxs.range_fold(start, end).ok(), naive_fold(&window, |x, y| *x.max(y)));
    }

    #[test]
    fn updates_propagate_to_root(
        values in leaves(),
        updates in proptest::collection::vec((any::<prop::sample::Index>(), -1_000i64..1_000), 1..32),
    ) {
        let mut tree = SegmentTree::new(values.clone(), Sum).expect("power of two");
        let mut model = values;

        for (at, value) in updates {
            let index = at.index(model.len());
            tree.update(index, value).expect("index in range");
            model[index] = value;

            prop_assert_eq!(*tree.get(index).expect("index in range"), value);
            assert_internal_nodes(&tree)?;
            prop_assert_eq!(*tree.fold_all(), model.iter().sum::<i64>());
        }
        prop_assert_eq!(tree.leaves(), model.as_slice());
    }

    #[test]
    fn out_of_range_is_rejected(values in leaves(), overshoot in 0usize..16) {
        let mut tree = SegmentTree::new(values.clone(), Min).expect("power of two");
        let len = values.len();
        let index = len + overshoot;
        let expected = SegmentTreeError::OutOfRange { index, len };

        prop_assert_eq!(tree.get(index).err(), Some(expected.clone()));
        prop_assert_eq!(tree.update(index, 0).err(), Some(expected.clone()));
        prop_assert_eq!(tree.range_fold(0, index).err(), Some(expected));
        prop_assert_eq!(tree.leaves(), values.as_slice());
    }

    #[test]
    fn non_power_of_two_sizes_are_rejected(len in 0usize..200) {
        prop_assume!(!len.is_power_of_two());
        let result = SegmentTree::new(vec![0u8; len], Max);
        prop_assert_eq!(result.err(), Some(SegmentTreeError::InvalidSize(len)));
        prop_assert!(padded_len(len) > len);
    }
}
