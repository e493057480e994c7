//! Buffer pool replacement layer.
//!
//! # Components
//! - [`replacer`] - The [`Replacer`] trait and the LRU-K policy
//! - [`ReplacerStats`] - Operation counters

pub mod replacer;
mod stats;

pub use replacer::{LruKReplacer, QueueKind, Replacer};
pub use stats::{ReplacerStats, StatsSnapshot};
