//! Frame replacement policies.
//!
//! A replacer decides which frame the buffer pool reclaims when it needs a
//! free frame and none is on the free list. The pool drives it through the
//! [`Replacer`] trait:
//! - `record_access` on every page request that resolves to a frame
//! - `set_evictable(id, false)` when pinning, `true` when the pin count hits 0
//! - `evict` to obtain a victim
//! - `remove` when a page is deleted outright
//! - `size` to check whether eviction is possible at all
//!
//! Implementations:
//! - [`LruKReplacer`] - LRU-K approximated with a history queue and a cache queue

mod frame_list;
mod lru_k;
mod record;

pub use lru_k::{LruKReplacer, QueueKind};

use crate::common::FrameId;

/// A thread-safe eviction policy.
///
/// Methods take `&self` so a pool can share one replacer across worker
/// threads (e.g. as `Arc<dyn Replacer>`).
pub trait Replacer: Send + Sync {
    /// Record that `frame_id` was accessed.
    fn record_access(&self, frame_id: FrameId);

    /// Mark a frame as evictable (unpinned) or not. Ignored for untracked frames.
    fn set_evictable(&self, frame_id: FrameId, evictable: bool);

    /// Select and stop tracking a victim frame.
    ///
    /// Returns `None` if no frame is evictable.
    fn evict(&self) -> Option<FrameId>;

    /// Stop tracking a frame whose page is being deleted.
    fn remove(&self, frame_id: FrameId);

    /// Number of evictable frames.
    fn size(&self) -> usize;
}
