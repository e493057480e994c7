//! Error types for the replacer.
//!
//! Only configuration problems are recoverable. Caller contract violations
//! (out-of-range frame ids, removing a pinned frame) panic instead, because
//! they indicate a bug in the owning buffer pool.

use thiserror::Error;

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// All recoverable errors raised by the replacer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The replacer must be able to track at least one frame.
    #[error("Invalid replacer capacity: {0} (must be > 0)")]
    InvalidCapacity(usize),

    /// The access threshold separating cold from warm frames must be >= 1.
    #[error("Invalid K: {0} (must be >= 1)")]
    InvalidK(usize),
}
