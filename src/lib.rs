//! lruk-replacer - the frame replacement policy of a database buffer pool.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │               Buffer Pool Manager (caller, not here)            │
//! │   page table · free list · disk I/O · pin counts                │
//! └──────┬──────────────┬──────────────┬─────────────┬──────────────┘
//!        │record_access │set_evictable │evict/remove │size
//!        ▼              ▼              ▼             ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   LruKReplacer (buffer/)                        │
//! │  Mutex<                                                         │
//! │    history queue  (count < K, first-access order)               │
//! │    cache queue    (count >= K, last-access order)               │
//! │    index          FrameId → History(handle) | Cache(handle)     │
//! │  >                                                              │
//! │  ReplacerStats (atomic counters)                                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (FrameId, Error, config)
//! - [`buffer`] - The replacer trait, the LRU-K policy and its statistics
//!
//! # Quick Start
//! ```
//! use lruk_replacer::{FrameId, LruKReplacer, Replacer};
//! use std::sync::Arc;
//!
//! let replacer: Arc<dyn Replacer> = Arc::new(LruKReplacer::new(16, 2));
//!
//! replacer.record_access(FrameId::new(3));
//! replacer.set_evictable(FrameId::new(3), false); // pinned
//! assert_eq!(replacer.evict(), None);
//!
//! replacer.set_evictable(FrameId::new(3), true); // unpinned
//! assert_eq!(replacer.evict(), Some(FrameId::new(3)));
//! ```

pub mod buffer;
pub mod common;

pub use common::config::DEFAULT_K;
pub use common::{Error, FrameId, ReplacerConfig, Result};

pub use buffer::{LruKReplacer, QueueKind, Replacer, ReplacerStats, StatsSnapshot};
