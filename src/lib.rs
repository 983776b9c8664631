//! Rankset - an in-memory ranked sorted set.
//!
//! Elements are unique by key and kept in the order defined by their own
//! `less` predicate. Besides O(1) key lookup and O(log n) insert/delete, the
//! set answers rank queries in O(log n): the position of a key, the element
//! at a position, and contiguous position ranges.
//!
//! The index above the element list is built deterministically. Instead of
//! drawing random heights, a node is promoted whenever more than `gap`
//! consecutive nodes sit under one index node, so heavy local insertion
//! causes local promotion and never a global rebuild.
//!
//! # Quick Start
//!
//! ```
//! use rankset::{Config, DuplicatePolicy, Entry, RankedSet};
//!
//! let config = Config::new().duplicates(DuplicatePolicy::Overwrite);
//! let mut board = RankedSet::with_config(config).unwrap();
//!
//! for (name, score) in [("ada", 120), ("bob", 80), ("cyd", 95)] {
//!     board.add(Entry::new(name, score)).unwrap();
//! }
//! board.add(Entry::new("bob", 130)).unwrap();
//!
//! let top: Vec<&str> = board.reverse_range(1, 2).unwrap().iter().map(|e| e.key).collect();
//! assert_eq!(top, vec!["bob", "ada"]);
//! assert_eq!(board.rank(&"cyd"), Ok(1));
//! ```
//!
//! The set is single-writer: it has no internal locking, and callers that
//! share it across threads must serialize mutation themselves.

mod dump;
mod index;
mod layer;
mod link;
mod node;

pub mod config;
pub mod element;
pub mod error;
pub mod rank;
pub mod set;

pub use config::{Config, DEFAULT_GAP, DuplicatePolicy, MIN_GAP};
pub use element::{Element, Entry, compare};
pub use error::{Error, Result};
pub use set::{Iter, RankedSet};
