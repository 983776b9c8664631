//! Layer table: one head/tail sentinel pair per level.
//!
//! Levels are always contiguous from 1 to the current top, so the table is a
//! `Vec` indexed by `level - 1`. An empty table means an empty set.

use crate::node::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Layer {
    pub head: NodeId,
    pub tail: NodeId,
}

pub(crate) struct LayerTable {
    layers: Vec<Layer>,
}

impl LayerTable {
    pub fn new() -> LayerTable {
        LayerTable { layers: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Number of the highest level, 0 when empty.
    pub fn top_level(&self) -> u32 {
        self.layers.len() as u32
    }

    pub fn get(&self, level: u32) -> Option<Layer> {
        if level == 0 {
            return None;
        }
        self.layers.get(level as usize - 1).copied()
    }

    /// The sentinels of `level`. Panics if the level does not exist.
    pub fn at(&self, level: u32) -> Layer {
        match self.get(level) {
            Some(layer) => layer,
            None => panic!("level {level} does not exist (top is {})", self.top_level()),
        }
    }

    pub fn top(&self) -> Option<Layer> {
        self.layers.last().copied()
    }

    pub fn contains(&self, level: u32) -> bool {
        level >= 1 && level <= self.top_level()
    }

    /// Append a new top level and return its number.
    pub fn push(&mut self, layer: Layer) -> u32 {
        self.layers.push(layer);
        self.top_level()
    }

    pub fn pop(&mut self) -> Option<Layer> {
        self.layers.pop()
    }

    pub fn clear(&mut self) {
        self.layers.clear();
    }

    /// Levels from the top down to the base.
    pub fn levels_top_down(&self) -> impl Iterator<Item = (u32, Layer)> + '_ {
        self.layers
            .iter()
            .enumerate()
            .rev()
            .map(|(i, layer)| (i as u32 + 1, *layer))
    }
}
