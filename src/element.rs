//! The contract a stored value must satisfy.
//!
//! A ranked set never looks inside its elements beyond three things: the
//! identity key used by the key directory, the opaque payload, and a strict
//! ordering predicate. Two elements whose predicates both answer `false`
//! tie; tied elements keep their insertion order at the base level.

use std::cmp::Ordering;
use std::hash::Hash;

/// A value that can be stored in a [`RankedSet`](crate::RankedSet).
pub trait Element {
    /// Stable identity. At most one element per key is stored.
    type Key: Eq + Hash + Clone;
    /// Opaque payload.
    type Value;

    fn key(&self) -> &Self::Key;

    fn value(&self) -> &Self::Value;

    /// Strict ordering: `true` if `self` sorts before `other`.
    fn less(&self, other: &Self) -> bool;
}

/// Three-way comparison derived from [`Element::less`].
pub fn compare<E: Element>(a: &E, b: &E) -> Ordering {
    if a.less(b) {
        return Ordering::Less;
    }
    if b.less(a) {
        return Ordering::Greater;
    }
    return Ordering::Equal;
}

/// A key/value pair ordered by its value.
///
/// This is the leaderboard shape: the key is a member id, the value a score.
/// Members with equal scores tie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Entry<K, V> {
        return Entry { key, value };
    }
}

impl<K, V> Element for Entry<K, V>
where
    K: Eq + Hash + Clone,
    V: Ord,
{
    type Key = K;
    type Value = V;

    fn key(&self) -> &K {
        return &self.key;
    }

    fn value(&self) -> &V {
        return &self.value;
    }

    fn less(&self, other: &Self) -> bool {
        return self.value < other.value;
    }
}
