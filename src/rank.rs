//! Rank and range queries.
//!
//! Ranks are 1-based. Spans turn the index into position arithmetic: walking
//! from a level's head and adding `span` at every step lands on the rank of
//! the node reached.
//!
//! - `rank(key)`: O(log n) - position of a key
//! - `at_rank(rank)`: O(log n) - element at a position
//! - `range(a, b)`: O(log n + |b - a|) - contiguous slice in ascending order
//!
//! Reverse variants count from the largest element: reverse rank `r` is
//! forward rank `len + 1 - r`.

use crate::element::Element;
use crate::error::{Error, Result};
use crate::node::{BASE_LEVEL, NodeId};
use crate::set::RankedSet;

impl<E: Element> RankedSet<E> {
    /// 1-based position of `key` in ascending order.
    pub fn rank(&self, key: &E::Key) -> Result<usize> {
        let target = *self.directory.get(key).ok_or(Error::KeyNotFound)?;
        Ok(self.rank_of(target))
    }

    /// 1-based position of `key` counted from the largest element.
    pub fn reverse_rank(&self, key: &E::Key) -> Result<usize> {
        let rank = self.rank(key)?;
        Ok(self.len() + 1 - rank)
    }

    pub fn at_rank(&self, rank: usize) -> Result<&E> {
        self.check_rank(rank)?;
        Ok(self.elem_of(self.node_at_rank(rank)))
    }

    pub fn at_reverse_rank(&self, rank: usize) -> Result<&E> {
        self.check_rank(rank)?;
        self.at_rank(self.len() + 1 - rank)
    }

    /// Elements ranked `start..=end` in ascending order. Bounds may be given
    /// in either order.
    pub fn range(&self, start: usize, end: usize) -> Result<Vec<&E>> {
        let (start, end) = if start > end { (end, start) } else { (start, end) };
        self.check_rank(start)?;
        self.check_rank(end)?;

        let mut out = Vec::with_capacity(end - start + 1);
        let mut cur = self.node_at_rank(start);
        for _ in start..=end {
            let node = self.arena.get(cur);
            assert!(node.is_data(), "range walk overran the tail below rank {end}");
            out.push(self.elem_of(cur));
            cur = node.next;
        }
        Ok(out)
    }

    /// Elements ranked `start..=end` from the largest, largest first.
    pub fn reverse_range(&self, start: usize, end: usize) -> Result<Vec<&E>> {
        let (start, end) = if start > end { (end, start) } else { (start, end) };
        self.check_rank(start)?;
        self.check_rank(end)?;
        let len = self.len();
        let mut out = self.range(len + 1 - end, len + 1 - start)?;
        out.reverse();
        Ok(out)
    }

    fn check_rank(&self, rank: usize) -> Result<()> {
        let len = self.len();
        if rank == 0 || rank > len {
            return Err(Error::RankOutOfRange { rank, len });
        }
        Ok(())
    }

    /// Rank of the base node `target`.
    ///
    /// Advances while the next node sorts at or before the target and
    /// descends otherwise. Meeting any node of the target's chain ends the
    /// walk. Elements tied with the target may pull the walk past it at the
    /// base level; it then steps back to the target by identity.
    fn rank_of(&self, target: NodeId) -> usize {
        let elem = self.elem_of(target);
        let mut cur = self.layers.at(self.layers.top_level()).head;
        let mut rank = 0;
        loop {
            let node = self.arena.get(cur);
            if self.arena.get(node.next).base == target {
                return rank + node.span;
            }
            if self.sorts_at_or_before(node.next, elem) {
                rank += node.span;
                cur = node.next;
                continue;
            }
            if node.level == BASE_LEVEL {
                break;
            }
            cur = node.down;
        }

        while cur != target {
            let node = self.arena.get(cur);
            assert!(node.is_data(), "rank walk passed the head without meeting its target");
            rank -= 1;
            cur = node.prev;
        }
        rank
    }

    /// Base node at `rank`. The rank must already be range-checked.
    fn node_at_rank(&self, rank: usize) -> NodeId {
        let mut cur = self.layers.at(self.layers.top_level()).head;
        let mut remaining = rank;
        loop {
            let node = self.arena.get(cur);
            assert!(!node.is_tail(), "rank walk overran the tail at level {}", node.level);
            if node.span > remaining {
                assert!(
                    node.level > BASE_LEVEL,
                    "base-level span {} at node {cur}",
                    node.span
                );
                cur = node.down;
            } else if node.span == remaining {
                return self.arena.get(node.next).base;
            } else {
                remaining -= node.span;
                cur = node.next;
            }
        }
    }
}
