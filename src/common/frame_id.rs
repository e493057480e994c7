//! Frame identifier type.

use std::fmt;

/// Identifies a frame in the owning buffer pool.
///
/// The replacer never looks inside a frame; the id is opaque value data
/// supplied by the caller. It wraps `usize` because the pool stores its
/// frames in a `Vec` and indexes them directly.
///
/// # Example
/// ```
/// use lruk_replacer::FrameId;
///
/// let frame_id = FrameId::new(5);
/// assert_eq!(frame_id.index(), 5);
/// assert_eq!(FrameId::from(5), frame_id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub usize);

impl FrameId {
    /// Create a new FrameId.
    #[inline]
    pub fn new(id: usize) -> Self {
        FrameId(id)
    }

    /// The raw index into the pool's frame array.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for FrameId {
    #[inline]
    fn from(id: usize) -> Self {
        FrameId(id)
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({})", self.0)
    }
}
