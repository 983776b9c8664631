//! The ranked set: construction, the key directory, insert and delete.
//!
//! # Operations
//!
//! - `add(elem)`: O(log n) search + amortized O(1) re-indexing
//! - `remove(key)`: O(log n) expected
//! - `get(key)` / `find(key)` / `contains_key(key)`: O(1) via the key directory
//! - `len()` / `layer_count()`: O(1)
//!
//! Rank and range queries live in [`crate::rank`].

use std::fmt;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::config::{Config, DuplicatePolicy};
use crate::element::Element;
use crate::error::{Error, Result};
use crate::layer::{Layer, LayerTable};
use crate::node::{Arena, BASE_LEVEL, NIL, Node, NodeId};

/// A key-unique, totally ordered collection with rank-based access.
///
/// ```
/// use rankset::{Entry, RankedSet};
///
/// let mut board = RankedSet::new();
/// board.add(Entry::new("ada", 30)).unwrap();
/// board.add(Entry::new("bob", 10)).unwrap();
/// board.add(Entry::new("cyd", 20)).unwrap();
///
/// assert_eq!(board.rank(&"cyd"), Ok(2));
/// assert_eq!(board.at_rank(1).unwrap().key, "bob");
/// assert_eq!(board.reverse_rank(&"ada"), Ok(1));
/// ```
pub struct RankedSet<E: Element> {
    pub(crate) arena: Arena<E>,
    pub(crate) layers: LayerTable,
    /// Key to base-level node.
    pub(crate) directory: FxHashMap<E::Key, NodeId>,
    pub(crate) config: Config,
}

impl<E: Element> RankedSet<E> {
    pub fn new() -> Self {
        RankedSet {
            arena: Arena::new(),
            layers: LayerTable::new(),
            directory: FxHashMap::default(),
            config: Config::default(),
        }
    }

    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let mut set = Self::new();
        set.config = config;
        Ok(set)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.directory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directory.is_empty()
    }

    /// Number of levels, base included. 0 for an empty set.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn contains_key(&self, key: &E::Key) -> bool {
        self.directory.contains_key(key)
    }

    pub fn get(&self, key: &E::Key) -> Option<&E> {
        let id = *self.directory.get(key)?;
        Some(self.elem_of(id))
    }

    /// Like [`get`](Self::get), but a missing key is an error.
    pub fn find(&self, key: &E::Key) -> Result<&E> {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Insert `elem`.
    ///
    /// Returns the element it replaced when the key was already present and
    /// the set overwrites duplicates.
    pub fn add(&mut self, elem: E) -> Result<Option<E>> {
        let mut replaced = None;
        if self.directory.contains_key(elem.key()) {
            match self.config.duplicates {
                DuplicatePolicy::Reject => return Err(Error::DuplicateKey),
                DuplicatePolicy::Overwrite => replaced = Some(self.remove(elem.key())?),
            }
        }

        let key = elem.key().clone();
        let id = self.arena.alloc_base(elem);
        if self.layers.is_empty() {
            self.open_base_layer();
        }
        let pivot = self.insertion_point(self.elem_of(id));
        self.insert_before(pivot, id);
        self.directory.insert(key, id);
        self.reindex_after_insert(id);

        self.debug_check();
        Ok(replaced)
    }

    /// Remove the element stored under `key` and return it.
    ///
    /// The key's nodes are found through the directory and the `up` links of
    /// its base node, not by a comparison search, so elements tied with it
    /// are never touched.
    pub fn remove(&mut self, key: &E::Key) -> Result<E> {
        let base = match self.directory.get(key) {
            Some(&id) => id,
            None => return Err(Error::KeyNotFound),
        };

        // The key's vertical chain, base first.
        let mut chain: SmallVec<[NodeId; 8]> = SmallVec::new();
        let mut id = base;
        while id != NIL {
            chain.push(id);
            id = self.arena.get(id).up;
        }
        let height = chain.len() as u32;

        for &id in chain[1..].iter().rev() {
            self.remove_index_node(id);
        }
        let elem = self.remove_base_node(base, height);
        self.directory.remove(key);

        self.debug_check();
        Ok(elem)
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.layers.clear();
        self.directory.clear();
    }

    /// Smallest element.
    pub fn first(&self) -> Option<&E> {
        let layer = self.layers.get(BASE_LEVEL)?;
        let first = self.arena.get(layer.head).next;
        self.arena.get(first).elem.as_ref()
    }

    /// Largest element.
    pub fn last(&self) -> Option<&E> {
        let layer = self.layers.get(BASE_LEVEL)?;
        let last = self.arena.get(layer.tail).prev;
        self.arena.get(last).elem.as_ref()
    }

    /// Elements in ascending order.
    pub fn iter(&self) -> Iter<'_, E> {
        let current = match self.layers.get(BASE_LEVEL) {
            Some(layer) => self.arena.get(layer.head).next,
            None => NIL,
        };
        Iter {
            set: self,
            current,
            remaining: self.len(),
        }
    }

    // --- Node access helpers ---

    /// The element a node stands for. Index nodes borrow it from their base.
    pub(crate) fn elem_of(&self, id: NodeId) -> &E {
        let base = self.arena.get(id).base;
        assert!(base != NIL, "sentinel {id} has no element");
        match self.arena.get(base).elem.as_ref() {
            Some(elem) => elem,
            None => panic!("base node {base} lost its element"),
        }
    }

    /// Whether node `id` sorts at or before `elem`. Heads precede
    /// everything, tails follow everything.
    pub(crate) fn sorts_at_or_before(&self, id: NodeId, elem: &E) -> bool {
        let node = self.arena.get(id);
        if node.is_head() {
            return true;
        }
        if node.is_tail() {
            return false;
        }
        !elem.less(self.elem_of(id))
    }

    /// Top-down search for the base-level node `elem` must be spliced in
    /// front of. Ties go after every element already present.
    fn insertion_point(&self, elem: &E) -> NodeId {
        let mut cur = self.layers.at(self.layers.top_level()).head;
        loop {
            let node = self.arena.get(cur);
            if self.sorts_at_or_before(node.next, elem) {
                cur = node.next;
                continue;
            }
            if node.level == BASE_LEVEL {
                return node.next;
            }
            cur = node.down;
        }
    }

    fn open_base_layer(&mut self) {
        let head = self.arena.alloc(Node::head(BASE_LEVEL));
        let tail = self.arena.alloc(Node::tail(BASE_LEVEL));
        let head_node = self.arena.get_mut(head);
        head_node.next = tail;
        head_node.span = 1;
        self.arena.get_mut(tail).prev = head;
        self.layers.push(Layer { head, tail });
    }

    #[cfg(debug_assertions)]
    fn debug_check(&self) {
        self.check_invariants();
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    fn debug_check(&self) {}
}

impl<E: Element> Default for RankedSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Element + fmt::Debug> fmt::Debug for RankedSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Duplicates that the policy rejects are skipped. Any other failure panics.
impl<E: Element> Extend<E> for RankedSet<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for elem in iter {
            match self.add(elem) {
                Ok(_) | Err(Error::DuplicateKey) => {}
                Err(err) => panic!("extend failed: {err}"),
            }
        }
    }
}

impl<E: Element> FromIterator<E> for RankedSet<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, E: Element> IntoIterator for &'a RankedSet<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Iter<'a, E> {
        self.iter()
    }
}

/// Ascending iterator over a [`RankedSet`].
pub struct Iter<'a, E: Element> {
    set: &'a RankedSet<E>,
    current: NodeId,
    remaining: usize,
}

impl<'a, E: Element> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let set = self.set;
        let node = set.arena.get(self.current);
        let elem = node.elem.as_ref()?;
        self.current = node.next;
        self.remaining -= 1;
        Some(elem)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E: Element> ExactSizeIterator for Iter<'_, E> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Entry;

    fn filled(n: u32) -> RankedSet<Entry<u32, u32>> {
        let mut set = RankedSet::new();
        for i in 0..n {
            set.add(Entry::new(i, i)).unwrap();
        }
        set
    }

    #[test]
    fn empty_set() {
        let set: RankedSet<Entry<u32, u32>> = RankedSet::new();
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
        assert_eq!(set.layer_count(), 0);
        assert_eq!(set.first(), None);
        assert_eq!(set.last(), None);
        assert_eq!(set.iter().count(), 0);
        assert_eq!(set.find(&1), Err(Error::KeyNotFound));
    }

    #[test]
    fn add_one() {
        let mut set = RankedSet::new();
        assert_eq!(set.add(Entry::new("a", 1)), Ok(None));
        assert_eq!(set.len(), 1);
        assert_eq!(set.layer_count(), 1);
        assert_eq!(set.get(&"a"), Some(&Entry::new("a", 1)));
        assert!(set.contains_key(&"a"));
    }

    #[test]
    fn add_out_of_order_iterates_sorted() {
        let mut set = RankedSet::new();
        for v in [50u32, 10, 40, 20, 30, 0, 60, 5] {
            set.add(Entry::new(v, v)).unwrap();
        }
        let values: Vec<u32> = set.iter().map(|e| e.value).collect();
        assert_eq!(values, vec![0, 5, 10, 20, 30, 40, 50, 60]);
        assert_eq!(set.first().map(|e| e.key), Some(0));
        assert_eq!(set.last().map(|e| e.key), Some(60));
    }

    #[test]
    fn reject_duplicate_keeps_original() {
        let mut set = RankedSet::new();
        set.add(Entry::new("k", 1)).unwrap();
        assert_eq!(set.add(Entry::new("k", 99)), Err(Error::DuplicateKey));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(&"k").map(|e| e.value), Some(1));
    }

    #[test]
    fn overwrite_duplicate_returns_previous() {
        let config = Config::new().duplicates(DuplicatePolicy::Overwrite);
        let mut set = RankedSet::with_config(config).unwrap();
        set.add(Entry::new("k", 1)).unwrap();
        set.add(Entry::new("j", 5)).unwrap();
        assert_eq!(set.add(Entry::new("k", 9)), Ok(Some(Entry::new("k", 1))));
        assert_eq!(set.len(), 2);
        let keys: Vec<&str> = set.iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["j", "k"]);
    }

    #[test]
    fn with_config_rejects_zero_gap() {
        let result = RankedSet::<Entry<u32, u32>>::with_config(Config::new().gap(0));
        assert!(matches!(result, Err(Error::InvalidGap(0))));
    }

    #[test]
    fn remove_returns_element() {
        let mut set = filled(10);
        assert_eq!(set.remove(&3), Ok(Entry::new(3, 3)));
        assert_eq!(set.len(), 9);
        assert!(!set.contains_key(&3));
        assert_eq!(set.remove(&3), Err(Error::KeyNotFound));
    }

    #[test]
    fn remove_everything_releases_all_nodes() {
        let mut set = filled(200);
        assert!(set.layer_count() > 1);
        for i in 0..200 {
            set.remove(&i).unwrap();
        }
        assert!(set.is_empty());
        assert_eq!(set.layer_count(), 0);
        assert_eq!(set.arena.live(), 0);
    }

    #[test]
    fn grows_layers_with_size() {
        let set = filled(1000);
        assert_eq!(set.len(), 1000);
        assert!(set.layer_count() >= 3, "only {} layers", set.layer_count());
        set.check_invariants();
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut set = RankedSet::new();
        for key in ["a", "b", "c", "d", "e", "f", "g", "h"] {
            set.add(Entry::new(key, 7)).unwrap();
        }
        let keys: Vec<&str> = set.iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["a", "b", "c", "d", "e", "f", "g", "h"]);
    }

    #[test]
    fn clear_resets() {
        let mut set = filled(50);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.layer_count(), 0);
        set.add(Entry::new(1, 1)).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn extend_skips_rejected_duplicates() {
        let mut set: RankedSet<Entry<u32, u32>> = (0..5).map(|i| Entry::new(i, i)).collect();
        set.extend([Entry::new(2, 100), Entry::new(9, 9)]);
        assert_eq!(set.len(), 6);
        assert_eq!(set.get(&2).map(|e| e.value), Some(2));
    }

    #[test]
    fn extend_overwrites_when_configured() {
        let config = Config::new().duplicates(DuplicatePolicy::Overwrite);
        let mut set = RankedSet::with_config(config).unwrap();
        set.extend((0..5u32).map(|i| Entry::new(i, i)));
        set.extend([Entry::new(2, 100), Entry::new(9, 9)]);
        assert_eq!(set.len(), 6);
        assert_eq!(set.get(&2).map(|e| e.value), Some(100));
        assert_eq!(set.last().map(|e| e.key), Some(2));
    }

    #[test]
    fn remove_among_ties_leaves_the_others() {
        let mut set = RankedSet::new();
        for key in 0..40u32 {
            set.add(Entry::new(key, 7)).unwrap();
        }
        assert!(set.layer_count() > 1);
        for key in [17u32, 2, 33, 20] {
            assert_eq!(set.remove(&key), Ok(Entry::new(key, 7)));
        }
        let expected: Vec<u32> = (0..40).filter(|k| ![17, 2, 33, 20].contains(k)).collect();
        let keys: Vec<u32> = set.iter().map(|e| e.key).collect();
        assert_eq!(keys, expected);
        for (i, key) in expected.iter().enumerate() {
            assert_eq!(set.rank(key), Ok(i + 1));
        }
    }

    #[test]
    fn debug_lists_in_order() {
        let mut set = RankedSet::new();
        set.add(Entry::new(1u8, 2u8)).unwrap();
        set.add(Entry::new(2u8, 1u8)).unwrap();
        assert_eq!(
            format!("{:?}", set),
            "[Entry { key: 2, value: 1 }, Entry { key: 1, value: 2 }]"
        );
    }
}
