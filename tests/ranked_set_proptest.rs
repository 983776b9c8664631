//! Property-based tests for the ranked set against an ordered-map model.

use std::collections::{BTreeMap, HashMap};

use proptest::prelude::*;
use rankset::{Config, DuplicatePolicy, Entry, Error, RankedSet};

// =============================================================================
// Test helpers
// =============================================================================

/// A random mutation on a small key space, so removals and overwrites hit.
#[derive(Clone, Debug)]
enum SetOp {
    Add { key: u16, score: u16 },
    Remove { key: u16 },
}

fn arbitrary_set_op() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        3 => (0u16..200, 0u16..50).prop_map(|(key, score)| SetOp::Add { key, score }),
        2 => (0u16..200).prop_map(|key| SetOp::Remove { key }),
    ]
}

/// Reference ordering: score first, then arrival sequence for ties.
#[derive(Default)]
struct Model {
    order: BTreeMap<(u16, u64), u16>,
    slots: HashMap<u16, (u16, u64)>,
    seq: u64,
}

impl Model {
    fn add(&mut self, key: u16, score: u16) {
        self.remove(key);
        self.seq += 1;
        self.order.insert((score, self.seq), key);
        self.slots.insert(key, (score, self.seq));
    }

    fn remove(&mut self, key: u16) -> bool {
        match self.slots.remove(&key) {
            Some(slot) => {
                self.order.remove(&slot);
                true
            }
            None => false,
        }
    }

    fn keys(&self) -> Vec<u16> {
        self.order.values().copied().collect()
    }
}

fn build(ops: &[SetOp], gap: usize) -> (RankedSet<Entry<u16, u16>>, Model) {
    let config = Config::new().duplicates(DuplicatePolicy::Overwrite).gap(gap);
    let mut set = RankedSet::with_config(config).unwrap();
    let mut model = Model::default();
    for op in ops {
        match *op {
            SetOp::Add { key, score } => {
                set.add(Entry::new(key, score)).unwrap();
                model.add(key, score);
            }
            SetOp::Remove { key } => {
                let expected = model.remove(key);
                assert_eq!(set.remove(&key).is_ok(), expected);
            }
        }
    }
    (set, model)
}

// =============================================================================
// Order and rank properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Iteration order matches the model's score-then-arrival order
    #[test]
    fn iteration_matches_model(
        ops in prop::collection::vec(arbitrary_set_op(), 0..300),
        gap in 2usize..8,
    ) {
        let (set, model) = build(&ops, gap);
        set.check_invariants();
        let keys: Vec<u16> = set.iter().map(|e| e.key).collect();
        prop_assert_eq!(keys, model.keys());
        prop_assert_eq!(set.len(), model.slots.len());
    }

    /// rank(key) is the key's 1-based position, and at_rank inverts it
    #[test]
    fn rank_matches_position(
        ops in prop::collection::vec(arbitrary_set_op(), 1..300),
        gap in 2usize..8,
    ) {
        let (set, model) = build(&ops, gap);
        for (i, key) in model.keys().into_iter().enumerate() {
            prop_assert_eq!(set.rank(&key), Ok(i + 1));
            prop_assert_eq!(set.at_rank(i + 1).map(|e| e.key), Ok(key));
            prop_assert_eq!(set.reverse_rank(&key), Ok(set.len() - i));
        }
    }

    /// Keys never added, or already removed, have no rank
    #[test]
    fn absent_keys_have_no_rank(
        ops in prop::collection::vec(arbitrary_set_op(), 0..200),
        probe in 0u16..250,
    ) {
        let (set, model) = build(&ops, 5);
        if !model.slots.contains_key(&probe) {
            prop_assert_eq!(set.rank(&probe), Err(Error::KeyNotFound));
            prop_assert!(set.get(&probe).is_none());
        }
    }
}

// =============================================================================
// Range properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// range(a, b) equals the model slice, in either argument order
    #[test]
    fn range_equals_model_slice(
        ops in prop::collection::vec(arbitrary_set_op(), 1..300),
        a in 0usize..220,
        b in 0usize..220,
    ) {
        let (set, model) = build(&ops, 4);
        let keys = model.keys();
        let (lo, hi) = if a > b { (b, a) } else { (a, b) };
        match set.range(a, b) {
            Ok(found) => {
                let found: Vec<u16> = found.iter().map(|e| e.key).collect();
                prop_assert_eq!(&found[..], &keys[lo - 1..hi]);
            }
            Err(Error::RankOutOfRange { len, .. }) => {
                prop_assert_eq!(len, keys.len());
                prop_assert!(lo == 0 || hi > keys.len());
            }
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
        }
    }

    /// reverse_range walks from the largest element downward
    #[test]
    fn reverse_range_is_mirrored(
        ops in prop::collection::vec(arbitrary_set_op(), 1..300),
        a in 1usize..30,
        b in 1usize..30,
    ) {
        let (set, model) = build(&ops, 5);
        let mut keys = model.keys();
        keys.reverse();
        let (lo, hi) = if a > b { (b, a) } else { (a, b) };
        if hi <= keys.len() {
            let found: Vec<u16> = set.reverse_range(a, b).unwrap().iter().map(|e| e.key).collect();
            prop_assert_eq!(&found[..], &keys[lo - 1..hi]);
        } else {
            prop_assert!(set.reverse_range(a, b).is_err());
        }
    }
}
