//! Per-frame replacement metadata.
//!
//! A [`FrameRecord`] is what the replacer knows about one frame:
//! - Which frame it describes
//! - How many accesses have been recorded
//! - Whether the frame may currently be chosen as a victim

use crate::common::FrameId;

/// Replacement metadata for a single tracked frame.
///
/// Records are owned by the replacer's arena and never handed out by
/// reference; callers only ever see the [`FrameId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FrameRecord {
    frame_id: FrameId,

    /// Number of recorded accesses. Keeps counting past K.
    access_count: usize,

    /// Unpinned frames are evictable. New records start evictable.
    evictable: bool,
}

impl FrameRecord {
    /// Create the record for a frame's first access.
    pub(crate) fn first_access(frame_id: FrameId) -> Self {
        Self {
            frame_id,
            access_count: 1,
            evictable: true,
        }
    }

    #[inline]
    pub(crate) fn frame_id(&self) -> FrameId {
        self.frame_id
    }

    #[inline]
    pub(crate) fn access_count(&self) -> usize {
        self.access_count
    }

    /// Count one more access. Returns the new count.
    #[inline]
    pub(crate) fn touch(&mut self) -> usize {
        self.access_count = self.access_count.saturating_add(1);
        self.access_count
    }

    #[inline]
    pub(crate) fn is_evictable(&self) -> bool {
        self.evictable
    }

    /// Set the evictable flag. Returns the previous value.
    #[inline]
    pub(crate) fn set_evictable(&mut self, evictable: bool) -> bool {
        std::mem::replace(&mut self.evictable, evictable)
    }

    /// Whether this frame has been seen at least `k` times.
    #[inline]
    pub(crate) fn reached(&self, k: usize) -> bool {
        self.access_count >= k
    }
}
