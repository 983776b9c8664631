//! Index maintenance: deterministic promotion instead of random heights.
//!
//! A run of more than `gap` nodes under one index node is overcrowded. After
//! every insertion the engine walks upward from the new node: while the
//! interval containing it is overcrowded, the node roughly in the middle of
//! the run is promoted and the check repeats one level higher. When the top
//! level itself holds more than `gap` nodes a new level is opened.
//!
//! ```text
//! gap = 5, insert F:
//!
//! Level 2: HEAD ---------------------------------------> TAIL
//! Level 1: HEAD -> A -> B -> C -> D -> E -> F -> TAIL      (6 > 5)
//!
//! Level 2: HEAD ---------------> C --------------------> TAIL
//! Level 1: HEAD -> A -> B -> C -> D -> E -> F -> TAIL
//! ```
//!
//! Deletion merges each removed index node into its predecessor. If the
//! removed interval plus the merged one exceeds `gap`, a neighbour of the
//! removed key is promoted to relieve it: the right one when the removed
//! interval alone is at least as large as the merged one, the left one
//! otherwise. A level left with only its sentinels is closed.

use crate::element::Element;
use crate::layer::Layer;
use crate::node::{BASE_LEVEL, NIL, Node, NodeId};
use crate::set::RankedSet;

impl<E: Element> RankedSet<E> {
    /// Restore density bounds above the freshly spliced base node `id`.
    pub(crate) fn reindex_after_insert(&mut self, id: NodeId) {
        let gap = self.config.gap;
        let offset = self.config.promote_offset();

        let mut node = id;
        loop {
            let level = self.arena.get(node).level;
            let run_start = if self.layers.contains(level + 1) {
                let owner = self.indexed_predecessor(node);
                assert!(owner != NIL, "level {level} node has no covering index node");
                let owner = self.arena.get(owner);
                if owner.links <= gap {
                    break;
                }
                owner.down
            } else {
                let head = self.layers.at(level).head;
                if !self.holds_more_than(head, gap) {
                    break;
                }
                self.open_layer();
                head
            };

            let mut mid = run_start;
            for _ in 0..offset {
                mid = self.arena.get(mid).next;
                assert!(
                    self.arena.get(mid).up == NIL,
                    "overcrowded run at level {level} is already indexed"
                );
            }
            self.promote(mid);
            node = self.arena.get(mid).up;
        }
    }

    /// Whether the level starting at `head` has more than `limit` data nodes.
    fn holds_more_than(&self, head: NodeId, limit: usize) -> bool {
        let mut count = 0;
        let mut cur = self.arena.get(head).next;
        while self.arena.get(cur).is_data() {
            count += 1;
            if count > limit {
                return true;
            }
            cur = self.arena.get(cur).next;
        }
        false
    }

    /// Open a new top level whose sentinels sit above the current top's.
    /// Returns the new level's number.
    pub(crate) fn open_layer(&mut self) -> u32 {
        let below = match self.layers.top() {
            Some(layer) => layer,
            None => panic!("cannot open an index level above an empty set"),
        };
        let level = self.layers.top_level() + 1;

        let mut head = Node::head(level);
        head.down = below.head;
        let mut tail = Node::tail(level);
        tail.down = below.tail;
        let head = self.arena.alloc(head);
        let tail = self.arena.alloc(tail);

        self.arena.get_mut(head).next = tail;
        self.arena.get_mut(tail).prev = head;
        self.arena.get_mut(below.head).up = head;
        self.arena.get_mut(below.tail).up = tail;

        self.layers.push(Layer { head, tail });
        tracing::debug!(level, "opened index level");
        level
    }

    /// Drop the top level's sentinels and sever the links into them.
    fn close_top_layer(&mut self) {
        let level = self.layers.top_level();
        let layer = match self.layers.pop() {
            Some(layer) => layer,
            None => panic!("no level to close"),
        };
        for sentinel in [layer.head, layer.tail] {
            let down = self.arena.get(sentinel).down;
            if down != NIL {
                self.arena.get_mut(down).up = NIL;
            }
            self.arena.release(sentinel);
        }
        tracing::debug!(level, "closed index level");
    }

    /// Remove one index node (level >= 2) of a key being deleted. Must run
    /// top-down over the key's chain.
    pub(crate) fn remove_index_node(&mut self, id: NodeId) {
        let gap = self.config.gap;
        let node = self.arena.get(id);
        assert!(node.up == NIL, "index nodes must be removed top-down");
        let (level, prev, next, down) = (node.level, node.prev, node.next, node.down);
        let (span, links) = (node.span, node.links);

        let pred = self.arena.get_mut(prev);
        pred.span += span;
        pred.links += links;
        pred.next = next;
        let merged = pred.links;
        self.arena.get_mut(next).prev = prev;
        self.arena.get_mut(down).up = NIL;
        self.arena.release(id);

        // The predecessor's count already includes the removed interval.
        if links + merged > gap {
            let below = self.arena.get(down);
            let candidate = if links >= merged { below.next } else { below.prev };
            if self.arena.get(candidate).up == NIL {
                self.promote(candidate);
            }
        }

        let layer = self.layers.at(level);
        if self.arena.get(layer.head).next == layer.tail {
            assert_eq!(level, self.layers.top_level(), "emptied level {level} is not the top");
            self.close_top_layer();
        }
    }

    /// Remove the base node of a key whose index nodes are already gone and
    /// return its element. `height` is how many levels the key occupied.
    pub(crate) fn remove_base_node(&mut self, id: NodeId, height: u32) -> E {
        let node = self.arena.get(id);
        assert!(node.up == NIL, "base node removed before its index nodes");
        let (prev, next) = (node.prev, node.next);

        let last = self.arena.get(prev).is_head() && self.arena.get(next).is_tail();
        if last {
            assert_eq!(self.layers.len(), 1, "last element removed with index levels left");
            let elem = self.arena.release(id);
            self.close_top_layer();
            return take_elem(elem, id);
        }

        self.arena.get_mut(prev).next = next;
        self.arena.get_mut(next).prev = prev;
        let elem = self.arena.release(id);

        // Every interval covering the removed rank shrinks by one. Intervals up
        // to one level above the key's highest node also lose a lower node.
        let mut owner = self.indexed_predecessor(prev);
        let mut level = BASE_LEVEL + 1;
        while owner != NIL {
            let node = self.arena.get_mut(owner);
            node.span -= 1;
            if level <= height + 1 {
                node.links -= 1;
            }
            owner = self.indexed_predecessor(owner);
            level += 1;
        }
        take_elem(elem, id)
    }
}

fn take_elem<E>(elem: Option<E>, id: NodeId) -> E {
    match elem {
        Some(elem) => elem,
        None => panic!("base node {id} carried no element"),
    }
}
