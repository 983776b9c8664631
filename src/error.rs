use thiserror::Error;

/// Caller-facing failures. Structural corruption is never reported here;
/// it panics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An element with the same key is already stored and the set rejects duplicates.
    #[error("an element with this key is already present")]
    DuplicateKey,

    /// No element is stored under the requested key.
    #[error("key not found")]
    KeyNotFound,

    /// A rank outside `1..=len` was requested.
    #[error("rank {rank} is out of range (len {len})")]
    RankOutOfRange { rank: usize, len: usize },

    /// The configured index gap cannot drive promotion.
    #[error("index gap must be at least 2, got {0}")]
    InvalidGap(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
