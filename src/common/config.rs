//! Replacer configuration.

use crate::common::{Error, FrameId, Result};

/// Default access threshold.
///
/// LRU-2 is the classic setting: a frame must be touched twice before it is
/// treated as warm, which is enough to keep one-off sequential scans from
/// flushing frequently used frames.
pub const DEFAULT_K: usize = 2;

/// Construction parameters for an LRU-K replacer.
///
/// # Example
/// ```
/// use lruk_replacer::ReplacerConfig;
///
/// let config = ReplacerConfig::new(64).with_k(3);
/// assert_eq!(config.capacity, 64);
/// assert_eq!(config.k, 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplacerConfig {
    /// Number of frames in the owning pool. Frame ids above this are rejected.
    pub capacity: usize,

    /// Access count at which a frame moves from the history queue to the cache queue.
    pub k: usize,
}

impl ReplacerConfig {
    /// Create a config for `capacity` frames with [`DEFAULT_K`].
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            k: DEFAULT_K,
        }
    }

    /// Override the access threshold.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Check that the parameters describe a usable replacer.
    ///
    /// # Errors
    /// - `Error::InvalidCapacity` if `capacity` is 0
    /// - `Error::InvalidK` if `k` is 0
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidCapacity(self.capacity));
        }
        if self.k == 0 {
            return Err(Error::InvalidK(self.k));
        }
        Ok(())
    }

    /// Whether `frame_id` does not exceed the configured bound.
    #[inline]
    pub fn is_valid_frame(&self, frame_id: FrameId) -> bool {
        frame_id.0 <= self.capacity
    }
}
