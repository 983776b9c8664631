//! Construction-time options.

use crate::error::{Error, Result};

/// Default maximum number of consecutive nodes allowed under one index node
/// before a promotion is triggered.
pub const DEFAULT_GAP: usize = 5;

/// Smallest usable gap. With a gap of 1 every node would need an upper
/// representative and the index would grow one level per insertion.
pub const MIN_GAP: usize = 2;

/// What `add` does when the key is already present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Fail with [`Error::DuplicateKey`], leaving the stored element in place.
    #[default]
    Reject,
    /// Remove the stored element, then insert the new one.
    Overwrite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub duplicates: DuplicatePolicy,
    /// Density threshold. A run of more than `gap` nodes without an upper
    /// representative gets its middle node promoted.
    pub gap: usize,
}

impl Config {
    pub fn new() -> Config {
        return Config {
            duplicates: DuplicatePolicy::Reject,
            gap: DEFAULT_GAP,
        };
    }

    pub fn duplicates(mut self, policy: DuplicatePolicy) -> Config {
        self.duplicates = policy;
        return self;
    }

    pub fn gap(mut self, gap: usize) -> Config {
        self.gap = gap;
        return self;
    }

    pub fn validate(&self) -> Result<()> {
        if self.gap < MIN_GAP {
            return Err(Error::InvalidGap(self.gap));
        }
        return Ok(());
    }

    /// Steps taken from the start of an overcrowded run to reach the node
    /// that gets promoted: `ceil((gap + 1) / 2)`.
    pub(crate) fn promote_offset(&self) -> usize {
        return (self.gap + 2) / 2;
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
