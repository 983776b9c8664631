//! AFL fuzz harness for the ranked set
//!
//! Every operation is applied both to a `RankedSet` and to a simple model
//! (a `BTreeMap` keyed by score then key). After each step the two must agree
//! on length, ranks and ranges, and the set's internal bookkeeping must pass
//! `check_invariants`.

use std::collections::BTreeMap;
use std::collections::HashMap;

use afl::fuzz;
use rankset::{Config, DuplicatePolicy, Entry, Error, RankedSet};

/// Operation types the fuzzer can generate
#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    /// Insert or overwrite `key` with `score`
    Add { key: u8, score: u8 },
    /// Remove `key`
    Remove { key: u8 },
    /// Compare the rank of `key`
    Rank { key: u8 },
    /// Compare a rank window
    Range { start: u8, end: u8 },
}

impl FuzzOp {
    fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        if bytes.is_empty() {
            return None;
        }

        let op_type = bytes[0] % 4;
        let rest = &bytes[1..];

        match op_type {
            0 if rest.len() >= 2 => Some((FuzzOp::Add { key: rest[0], score: rest[1] }, &rest[2..])),
            1 if !rest.is_empty() => Some((FuzzOp::Remove { key: rest[0] }, &rest[1..])),
            2 if !rest.is_empty() => Some((FuzzOp::Rank { key: rest[0] }, &rest[1..])),
            3 if rest.len() >= 2 => Some((FuzzOp::Range { start: rest[0], end: rest[1] }, &rest[2..])),
            _ => None,
        }
    }
}

/// Reference ordering: by score, ties broken by insertion sequence.
#[derive(Default)]
struct Model {
    order: BTreeMap<(u8, u64), u8>,
    scores: HashMap<u8, (u8, u64)>,
    seq: u64,
}

impl Model {
    fn add(&mut self, key: u8, score: u8) {
        self.remove(key);
        self.seq += 1;
        self.order.insert((score, self.seq), key);
        self.scores.insert(key, (score, self.seq));
    }

    fn remove(&mut self, key: u8) -> bool {
        match self.scores.remove(&key) {
            Some(slot) => {
                self.order.remove(&slot);
                true
            }
            None => false,
        }
    }

    fn keys(&self) -> Vec<u8> {
        self.order.values().copied().collect()
    }
}

fn main() {
    fuzz!(|data: &[u8]| {
        let config = Config::new().duplicates(DuplicatePolicy::Overwrite).gap(2 + data.len() % 5);
        let mut set = RankedSet::with_config(config).unwrap();
        let mut model = Model::default();
        let mut remaining = data;

        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            remaining = rest;

            match op {
                FuzzOp::Add { key, score } => {
                    set.add(Entry::new(key, score)).unwrap();
                    model.add(key, score);
                }
                FuzzOp::Remove { key } => {
                    let expected = model.remove(key);
                    assert_eq!(set.remove(&key).is_ok(), expected, "remove {key}");
                }
                FuzzOp::Rank { key } => {
                    let keys = model.keys();
                    match keys.iter().position(|&k| k == key) {
                        Some(pos) => assert_eq!(set.rank(&key), Ok(pos + 1)),
                        None => assert_eq!(set.rank(&key), Err(Error::KeyNotFound)),
                    }
                }
                FuzzOp::Range { start, end } => {
                    let keys = model.keys();
                    let (start, end) = (start as usize, end as usize);
                    let (lo, hi) = if start > end { (end, start) } else { (start, end) };
                    match set.range(start, end) {
                        Ok(found) => {
                            let found: Vec<u8> = found.iter().map(|e| e.key).collect();
                            assert_eq!(found, keys[lo - 1..hi].to_vec());
                        }
                        Err(_) => assert!(lo == 0 || hi > keys.len()),
                    }
                }
            }

            assert_eq!(set.len(), model.scores.len(), "length mismatch");
        }

        // Final structural check, independent of build profile.
        set.check_invariants();
        let keys: Vec<u8> = set.iter().map(|e| e.key).collect();
        assert_eq!(keys, model.keys(), "final order mismatch");
    });
}
