//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install a test-friendly subscriber once; `RUST_LOG=arbor=trace` shows
/// rotations, propagation and unions.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Left-to-right fold of `values` with `f`, computed without any tree.
pub fn naive_fold<T: Clone>(values: &[T], f: impl Fn(&T, &T) -> T) -> Option<T> {
    let (first, rest) = values.split_first()?;
    Some(rest.iter().fold(first.clone(), |acc, value| f(&acc, value)))
}

/// Smallest power of two that is at least `len` (and at least 1).
pub fn padded_len(len: usize) -> usize {
    len.max(1).next_power_of_two()
}
