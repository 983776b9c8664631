//! Diagnostics: a per-level dump and the structural invariant checker.

use std::fmt::Debug;
use std::fmt::Write;

use crate::element::Element;
use crate::node::{BASE_LEVEL, NIL, NodeId};
use crate::set::RankedSet;

impl<E: Element + Debug> RankedSet<E> {
    /// Human-readable listing of every level, top first. Each node prints as
    /// `[element level span link]`.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (level, layer) in self.layers.levels_top_down() {
            let _ = write!(out, "L{level}:");
            let mut cur = layer.head;
            while cur != NIL {
                let node = self.arena.get(cur);
                let label = if node.is_head() {
                    "HEAD".to_string()
                } else if node.is_tail() {
                    "TAIL".to_string()
                } else {
                    format!("{:?}", self.elem_of(cur))
                };
                let _ = write!(
                    out,
                    " [{label} lay:{} span:{} link:{}]",
                    node.level, node.span, node.links
                );
                cur = node.next;
            }
            out.push('\n');
        }
        out
    }
}

impl<E: Element> RankedSet<E> {
    /// Walk the whole structure and panic on the first broken invariant.
    ///
    /// Checked: link symmetry, sentinel wiring, ordering on every level, span
    /// sums, exact `span`/`links` of every index interval against the level
    /// below, the key directory, and that no arena slot is unreachable.
    pub fn check_invariants(&self) {
        let len = self.directory.len();
        if len == 0 {
            assert!(self.layers.is_empty(), "empty set still has {} levels", self.layers.len());
            assert_eq!(self.arena.live(), 0, "empty set still holds nodes");
            return;
        }
        assert!(!self.layers.is_empty(), "non-empty set has no levels");

        let top = self.layers.top_level();
        let mut reachable = 0;
        for (level, layer) in self.layers.levels_top_down() {
            let head = self.arena.get(layer.head);
            let tail = self.arena.get(layer.tail);
            assert!(head.is_head() && tail.is_tail(), "level {level} sentinels mislabeled");
            assert_eq!(head.prev, NIL, "level {level} head has a predecessor");
            if level == top {
                assert_eq!(head.up, NIL, "top head has an upper link");
                assert_eq!(tail.up, NIL, "top tail has an upper link");
            }
            if level > BASE_LEVEL {
                let below = self.layers.at(level - 1);
                assert_eq!(head.down, below.head, "level {level} head not above lower head");
                assert_eq!(tail.down, below.tail, "level {level} tail not above lower tail");
            } else {
                assert_eq!(head.down, NIL, "base head has a lower link");
                assert_eq!(tail.down, NIL, "base tail has a lower link");
            }

            let mut span_sum = 0;
            let mut data = 0;
            let mut prev = NIL;
            let mut prev_data: Option<NodeId> = None;
            let mut cur = layer.head;
            loop {
                let node = self.arena.get(cur);
                assert_eq!(node.prev, prev, "level {level} node {cur} has a stale prev link");
                assert_eq!(node.level, level, "node {cur} reports level {}", node.level);
                if node.up != NIL {
                    assert_eq!(self.arena.get(node.up).down, cur, "node {cur} up link is one-way");
                }
                span_sum += node.span;
                reachable += 1;

                if node.is_data() {
                    data += 1;
                    let elem = self.elem_of(cur);
                    if let Some(p) = prev_data {
                        assert!(!elem.less(self.elem_of(p)), "level {level} is out of order at {cur}");
                    }
                    prev_data = Some(cur);

                    if level == BASE_LEVEL {
                        assert_eq!(node.span, 1, "base-level span {} at {cur}", node.span);
                        assert_eq!(node.links, 0, "base node {cur} counts links");
                        assert_eq!(node.base, cur, "base node {cur} points elsewhere");
                        assert_eq!(
                            self.directory.get(elem.key()),
                            Some(&cur),
                            "directory does not point at base node {cur}"
                        );
                    } else {
                        assert!(node.elem.is_none(), "index node {cur} carries an element");
                        let below = self.arena.get(node.down);
                        assert_eq!(below.up, cur, "node {cur} down link is one-way");
                        assert_eq!(below.base, node.base, "node {cur} chain has mixed keys");
                    }
                }

                if node.is_tail() {
                    assert_eq!(cur, layer.tail, "level {level} has a stray tail");
                    assert_eq!(node.next, NIL, "level {level} tail has a successor");
                    assert_eq!((node.span, node.links), (0, 0), "level {level} tail counts ranks");
                    break;
                }
                assert!(node.next != NIL, "level {level} is not terminated by its tail");

                if level > BASE_LEVEL {
                    let stop = self.arena.get(node.next).down;
                    let (links, span) = self.measure(node.down, stop);
                    assert_eq!(node.links, links, "level {level} node {cur} link count drifted");
                    assert_eq!(node.span, span, "level {level} node {cur} span drifted");
                } else if node.is_head() {
                    assert_eq!((node.span, node.links), (1, 0), "base head counts ranks");
                }

                prev = cur;
                cur = node.next;
            }

            assert_eq!(span_sum, len + 1, "level {level} spans sum to {span_sum}, expected {}", len + 1);
            if level == BASE_LEVEL {
                assert_eq!(data, len, "base level holds {data} elements, directory {len}");
            } else {
                assert!(data > 0, "level {level} holds only its sentinels");
            }
        }

        assert_eq!(reachable, self.arena.live(), "arena holds unreachable nodes");
    }

    /// Count nodes and sum spans on one level from `from` up to, not
    /// including, `to`.
    fn measure(&self, from: NodeId, to: NodeId) -> (usize, usize) {
        let mut count = 0;
        let mut span = 0;
        let mut cur = from;
        while cur != to {
            assert!(cur != NIL, "interval from {from} never reaches {to}");
            let node = self.arena.get(cur);
            count += 1;
            span += node.span;
            cur = node.next;
        }
        (count, span)
    }
}
