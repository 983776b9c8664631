//! Link primitives shared by insertion, deletion and re-indexing.
//!
//! Each of these keeps `span` and `links` exact: inserting one base element
//! grows every index interval that covers it by one rank, and promoting a
//! node splits its upper interval in two.

use crate::element::Element;
use crate::node::{NIL, Node, NodeId};
use crate::set::RankedSet;

impl<E: Element> RankedSet<E> {
    /// Walk `prev` from `id` (inclusive) to the first node that has an upper
    /// representative and return that representative: the index node whose
    /// interval contains `id`. `NIL` when `id` is on the top level.
    pub(crate) fn indexed_predecessor(&self, id: NodeId) -> NodeId {
        let mut cur = id;
        while cur != NIL {
            let node = self.arena.get(cur);
            if node.up != NIL {
                return node.up;
            }
            cur = node.prev;
        }
        NIL
    }

    /// Splice the base-level node `id` in front of `pivot`, then account for
    /// the new rank in every index interval above it.
    pub(crate) fn insert_before(&mut self, pivot: NodeId, id: NodeId) {
        let prev = self.arena.get(pivot).prev;
        assert!(prev != NIL, "cannot insert in front of a head sentinel");

        let node = self.arena.get_mut(id);
        node.prev = prev;
        node.next = pivot;
        self.arena.get_mut(prev).next = id;
        self.arena.get_mut(pivot).prev = id;

        let mut owner = self.indexed_predecessor(prev);
        if owner != NIL {
            self.arena.get_mut(owner).links += 1;
        }
        while owner != NIL {
            self.arena.get_mut(owner).span += 1;
            owner = self.indexed_predecessor(owner);
        }
    }

    /// Create `id`'s representative one level up, unless it already has one.
    ///
    /// The new node takes over the part of its upper predecessor's interval
    /// that starts at `id`. The level above must already have sentinels.
    pub(crate) fn promote(&mut self, id: NodeId) {
        let node = self.arena.get(id);
        if node.up != NIL {
            return;
        }
        let level = node.level;
        let base = node.base;

        // Forward to the next indexed node, collecting the new node's interval.
        let mut front = id;
        let mut span = 0;
        let mut links = 0;
        loop {
            let node = self.arena.get(front);
            if node.up != NIL {
                break;
            }
            span += node.span;
            links += 1;
            front = node.next;
            assert!(front != NIL, "cannot promote into level {}: it has no sentinels", level + 1);
        }
        let upper_next = self.arena.get(front).up;

        // Backward to the previous indexed node, collecting what it keeps.
        let mut back = id;
        let mut back_span = 0;
        let mut back_links = 0;
        loop {
            back = self.arena.get(back).prev;
            assert!(back != NIL, "cannot promote into level {}: it has no sentinels", level + 1);
            let node = self.arena.get(back);
            back_span += node.span;
            back_links += 1;
            if node.up != NIL {
                break;
            }
        }
        let upper_prev = self.arena.get(back).up;

        let mut upper = Node::index(level + 1, base, id);
        upper.next = upper_next;
        upper.prev = upper_prev;
        upper.span = span;
        upper.links = links;
        let new = self.arena.alloc(upper);

        self.arena.get_mut(id).up = new;
        self.arena.get_mut(upper_next).prev = new;
        let prev = self.arena.get_mut(upper_prev);
        prev.next = new;
        prev.span = back_span;
        prev.links = back_links;

        let owner = self.indexed_predecessor(new);
        if owner != NIL {
            self.arena.get_mut(owner).links += 1;
        }
        tracing::trace!(level = level + 1, span, links, "promoted node");
    }
}

#[cfg(test)]
mod tests {
    use crate::element::Entry;
    use crate::node::BASE_LEVEL;
    use crate::set::RankedSet;

    fn filled(n: u32) -> RankedSet<Entry<u32, u32>> {
        let mut set = RankedSet::new();
        for i in 0..n {
            set.add(Entry::new(i, i)).unwrap();
        }
        set
    }

    #[test]
    fn indexed_predecessor_on_single_level_is_nil() {
        let set = filled(3);
        assert_eq!(set.layer_count(), 1);
        let base = set.directory[&2];
        assert_eq!(set.indexed_predecessor(base), crate::node::NIL);
    }

    #[test]
    fn indexed_predecessor_finds_covering_interval() {
        let set = filled(20);
        assert!(set.layer_count() >= 2);
        let base = set.directory[&19];
        let owner = set.indexed_predecessor(base);
        let node = set.arena.get(owner);
        assert_eq!(node.level, BASE_LEVEL + 1);
        // The covering interval starts at or before the key.
        assert!(node.is_head() || set.elem_of(owner).value <= 19);
    }

    #[test]
    fn promote_is_idempotent() {
        let mut set = filled(20);
        let base = set.directory[&10];
        set.promote(base);
        let up = set.arena.get(base).up;
        set.promote(base);
        assert_eq!(set.arena.get(base).up, up);
        set.check_invariants();
    }

    #[test]
    fn promote_splits_interval_exactly() {
        let mut set = filled(20);
        let candidate = (0..20)
            .map(|k| set.directory[&k])
            .find(|&id| set.arena.get(id).up == crate::node::NIL)
            .unwrap();
        let layer_nodes_before = set.arena.live();
        set.promote(candidate);
        assert_eq!(set.arena.live(), layer_nodes_before + 1);
        set.check_invariants();
    }

    #[test]
    #[should_panic(expected = "has no sentinels")]
    fn promote_without_upper_level_panics() {
        let mut set = filled(3);
        let base = set.directory[&1];
        set.promote(base);
    }
}
