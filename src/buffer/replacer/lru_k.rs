//! LRU-K replacement policy.
//!
//! Frames are split into two queues:
//!
//! ```text
//!   history (count < K, by first access)     cache (count >= K, by last access)
//!   ┌────┬────┬────┬────┐                    ┌────┬────┬────┐
//!   │ f3 │ f7 │ f1 │ f9 │ ◀─ new frames      │ f2 │ f5 │ f0 │ ◀─ every access
//!   └────┴────┴────┴────┘                    └────┴────┴────┘
//!     ▲ evicted first          K-th access ─────────▶ ▲ evicted second
//! ```
//!
//! Cold frames have an infinite backward K-distance, so any evictable frame in
//! the history queue is chosen before a warm one. Within the cache queue the
//! least recently accessed frame goes first. Re-insertion order stands in for
//! timestamps, which approximates true LRU-K without storing access histories.

use std::collections::HashMap;

use log::{debug, trace};
use parking_lot::Mutex;

use super::frame_list::{FrameArena, FrameQueue, Handle};
use super::record::FrameRecord;
use super::Replacer;
use crate::buffer::ReplacerStats;
use crate::common::{FrameId, ReplacerConfig, Result};

/// Which queue currently holds a tracked frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueKind {
    /// Fewer than K accesses, ordered by first access.
    History,
    /// K or more accesses, ordered by most recent access.
    Cache,
}

/// Where a tracked frame lives. Untracked frames have no entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Residency {
    History(Handle),
    Cache(Handle),
}

impl Residency {
    #[inline]
    fn handle(self) -> Handle {
        match self {
            Residency::History(handle) | Residency::Cache(handle) => handle,
        }
    }

    #[inline]
    fn kind(self) -> QueueKind {
        match self {
            Residency::History(_) => QueueKind::History,
            Residency::Cache(_) => QueueKind::Cache,
        }
    }
}

/// Everything guarded by the replacer latch.
#[derive(Debug)]
struct LruKState {
    arena: FrameArena,
    history: FrameQueue,
    cache: FrameQueue,
    index: HashMap<FrameId, Residency>,

    /// Tracked frames with `evictable == true`.
    evictable_count: usize,
}

impl LruKState {
    fn new(capacity: usize) -> Self {
        Self {
            arena: FrameArena::with_capacity(capacity),
            history: FrameQueue::new(),
            cache: FrameQueue::new(),
            index: HashMap::with_capacity(capacity),
            evictable_count: 0,
        }
    }

    /// Returns true if this access moved the frame into the cache queue.
    fn record_access(&mut self, frame_id: FrameId, k: usize) -> bool {
        match self.index.get(&frame_id).copied() {
            Some(Residency::Cache(handle)) => {
                let count = self.arena.get_mut(handle).touch();
                self.cache.move_to_back(&mut self.arena, handle);
                trace!("{} accessed in cache queue (count {})", frame_id, count);
                false
            }
            Some(Residency::History(handle)) => {
                let count = self.arena.get_mut(handle).touch();
                if count < k {
                    trace!("{} accessed in history queue (count {})", frame_id, count);
                    return false;
                }
                self.history.unlink(&mut self.arena, handle);
                self.cache.push_back(&mut self.arena, handle);
                self.index.insert(frame_id, Residency::Cache(handle));
                debug!("{} promoted to cache queue after {} accesses", frame_id, count);
                self.debug_check();
                true
            }
            None => {
                let record = FrameRecord::first_access(frame_id);
                let warm = record.reached(k);
                let handle = self.arena.insert(record);
                self.evictable_count += 1;

                if warm {
                    self.cache.push_back(&mut self.arena, handle);
                    self.index.insert(frame_id, Residency::Cache(handle));
                    debug!("{} tracked directly in cache queue (k = {})", frame_id, k);
                } else {
                    self.history.push_back(&mut self.arena, handle);
                    self.index.insert(frame_id, Residency::History(handle));
                    trace!("{} tracked in history queue", frame_id);
                }
                self.debug_check();
                warm
            }
        }
    }

    fn set_evictable(&mut self, frame_id: FrameId, evictable: bool) {
        let Some(residency) = self.index.get(&frame_id).copied() else {
            return;
        };

        let was = self.arena.get_mut(residency.handle()).set_evictable(evictable);
        match (was, evictable) {
            (false, true) => self.evictable_count += 1,
            (true, false) => self.evictable_count -= 1,
            _ => {}
        }
        trace!("{} evictable = {}", frame_id, evictable);
        self.debug_check();
    }

    fn evict(&mut self) -> Option<(FrameId, QueueKind)> {
        let residency = match self.history.find(&self.arena, FrameRecord::is_evictable) {
            Some(handle) => Residency::History(handle),
            None => Residency::Cache(self.cache.find(&self.arena, FrameRecord::is_evictable)?),
        };

        let record = self.detach(residency);
        Some((record.frame_id(), residency.kind()))
    }

    /// Drop a tracked frame. Panics if it is pinned; untracked frames are ignored.
    fn remove(&mut self, frame_id: FrameId) -> Option<FrameRecord> {
        let residency = self.index.get(&frame_id).copied()?;

        assert!(
            self.arena.get(residency.handle()).is_evictable(),
            "cannot remove non-evictable {}",
            frame_id
        );

        Some(self.detach(residency))
    }

    /// Unlink a record from its queue, the index, and the arena.
    fn detach(&mut self, residency: Residency) -> FrameRecord {
        let handle = residency.handle();
        match residency {
            Residency::History(_) => self.history.unlink(&mut self.arena, handle),
            Residency::Cache(_) => self.cache.unlink(&mut self.arena, handle),
        }

        let record = self.arena.release(handle);
        self.index.remove(&record.frame_id());
        if record.is_evictable() {
            self.evictable_count -= 1;
        }
        self.debug_check();
        record
    }

    /// Every tracked frame is linked into exactly one queue.
    #[inline]
    fn debug_check(&self) {
        debug_assert_eq!(self.history.len() + self.cache.len(), self.index.len());
        debug_assert_eq!(self.arena.len(), self.index.len());
        debug_assert!(self.evictable_count <= self.index.len());
        debug_assert_eq!(
            self.evictable_count,
            self.history
                .iter(&self.arena)
                .chain(self.cache.iter(&self.arena))
                .filter(|(_, record)| record.is_evictable())
                .count()
        );
    }

    fn record(&self, frame_id: FrameId) -> Option<&FrameRecord> {
        self.index
            .get(&frame_id)
            .map(|residency| self.arena.get(residency.handle()))
    }

    fn order(&self, kind: QueueKind) -> Vec<FrameId> {
        let queue = match kind {
            QueueKind::History => &self.history,
            QueueKind::Cache => &self.cache,
        };
        queue
            .iter(&self.arena)
            .map(|(_, record)| record.frame_id())
            .collect()
    }
}

/// Thread-safe LRU-K frame replacer.
///
/// # Thread Safety
/// All queue state sits behind a single `parking_lot::Mutex`, held for the
/// whole of each public call, so concurrent calls are linearizable. The guard
/// releases on every return path, including contract-violation panics, and
/// `parking_lot` locks do not poison.
///
/// # Contract
/// - `record_access` panics if the frame id exceeds `capacity`.
/// - `remove` panics if the frame is tracked and not evictable.
///
/// Both are bugs in the owning buffer pool. The check runs before any state
/// changes, so a caught panic leaves the replacer untouched.
///
/// # Example
/// ```
/// use lruk_replacer::{FrameId, LruKReplacer};
///
/// let replacer = LruKReplacer::new(8, 2);
/// replacer.record_access(FrameId::new(1));
/// replacer.record_access(FrameId::new(2));
/// replacer.record_access(FrameId::new(1)); // frame 1 is now warm
///
/// assert_eq!(replacer.size(), 2);
/// assert_eq!(replacer.evict(), Some(FrameId::new(2)));
/// assert_eq!(replacer.evict(), Some(FrameId::new(1)));
/// assert_eq!(replacer.evict(), None);
/// ```
#[derive(Debug)]
pub struct LruKReplacer {
    config: ReplacerConfig,
    state: Mutex<LruKState>,
    stats: ReplacerStats,
}

impl LruKReplacer {
    /// Create a replacer for `capacity` frames with threshold `k`.
    ///
    /// # Panics
    /// Panics if `capacity` or `k` is 0.
    pub fn new(capacity: usize, k: usize) -> Self {
        let config = ReplacerConfig::new(capacity).with_k(k);
        if let Err(err) = config.validate() {
            panic!("{}", err);
        }
        Self::build(config)
    }

    /// Create a replacer from a validated config.
    ///
    /// # Errors
    /// - `Error::InvalidCapacity` if `config.capacity` is 0
    /// - `Error::InvalidK` if `config.k` is 0
    pub fn with_config(config: ReplacerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ReplacerConfig) -> Self {
        debug!(
            "creating LRU-K replacer (capacity = {}, k = {})",
            config.capacity, config.k
        );
        Self {
            config,
            state: Mutex::new(LruKState::new(config.capacity)),
            stats: ReplacerStats::new(),
        }
    }

    // ========================================================================
    // Policy operations
    // ========================================================================

    /// Record one access to `frame_id`.
    ///
    /// Unseen frames start in the history queue as evictable. The K-th access
    /// moves a frame to the back of the cache queue; later accesses move it to
    /// the back again.
    ///
    /// # Panics
    /// Panics if `frame_id` exceeds `capacity`.
    pub fn record_access(&self, frame_id: FrameId) {
        assert!(
            self.config.is_valid_frame(frame_id),
            "invalid {}: replacer capacity is {}",
            frame_id,
            self.config.capacity
        );

        let promoted = self.state.lock().record_access(frame_id, self.config.k);

        ReplacerStats::bump(&self.stats.accesses);
        if promoted {
            ReplacerStats::bump(&self.stats.promotions);
        }
    }

    /// Mark a frame as evictable or pinned.
    ///
    /// Ignored for frames the replacer is not tracking. Queue order is unchanged.
    pub fn set_evictable(&self, frame_id: FrameId, evictable: bool) {
        self.state.lock().set_evictable(frame_id, evictable);
    }

    /// Pick a victim, stop tracking it, and return its id.
    ///
    /// Returns `None` if no tracked frame is evictable.
    pub fn evict(&self) -> Option<FrameId> {
        let victim = self.state.lock().evict();

        match victim {
            Some((frame_id, queue)) => {
                debug!("evicted {} from {:?} queue", frame_id, queue);
                ReplacerStats::bump(&self.stats.evictions);
                Some(frame_id)
            }
            None => {
                debug!("no evictable frame");
                ReplacerStats::bump(&self.stats.failed_evictions);
                None
            }
        }
    }

    /// Stop tracking `frame_id`, regardless of its position in either queue.
    ///
    /// No-op if the frame is not tracked.
    ///
    /// # Panics
    /// Panics if the frame is tracked but not evictable.
    pub fn remove(&self, frame_id: FrameId) {
        let removed = self.state.lock().remove(frame_id);

        if let Some(record) = removed {
            debug!(
                "removed {} after {} accesses",
                frame_id,
                record.access_count()
            );
            ReplacerStats::bump(&self.stats.removals);
        }
    }

    /// Number of evictable frames across both queues.
    pub fn size(&self) -> usize {
        self.state.lock().evictable_count
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Largest accepted frame id.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Access threshold separating cold from warm frames.
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// Operation counters.
    pub fn stats(&self) -> &ReplacerStats {
        &self.stats
    }

    /// Number of tracked frames, evictable or not.
    pub fn tracked_count(&self) -> usize {
        self.state.lock().index.len()
    }

    pub fn is_tracked(&self, frame_id: FrameId) -> bool {
        self.state.lock().index.contains_key(&frame_id)
    }

    /// Recorded accesses for `frame_id`, or `None` if untracked.
    pub fn access_count(&self, frame_id: FrameId) -> Option<usize> {
        self.state.lock().record(frame_id).map(FrameRecord::access_count)
    }

    /// Evictable flag for `frame_id`, or `None` if untracked.
    pub fn is_evictable(&self, frame_id: FrameId) -> Option<bool> {
        self.state.lock().record(frame_id).map(FrameRecord::is_evictable)
    }

    /// Queue holding `frame_id`, or `None` if untracked.
    pub fn queue_of(&self, frame_id: FrameId) -> Option<QueueKind> {
        self.state
            .lock()
            .index
            .get(&frame_id)
            .map(|residency| residency.kind())
    }

    /// History queue contents, next victim first.
    pub fn history_order(&self) -> Vec<FrameId> {
        self.state.lock().order(QueueKind::History)
    }

    /// Cache queue contents, least recently accessed first.
    pub fn cache_order(&self) -> Vec<FrameId> {
        self.state.lock().order(QueueKind::Cache)
    }
}

impl Replacer for LruKReplacer {
    fn record_access(&self, frame_id: FrameId) {
        LruKReplacer::record_access(self, frame_id)
    }

    fn set_evictable(&self, frame_id: FrameId, evictable: bool) {
        LruKReplacer::set_evictable(self, frame_id, evictable)
    }

    fn evict(&self) -> Option<FrameId> {
        LruKReplacer::evict(self)
    }

    fn remove(&self, frame_id: FrameId) {
        LruKReplacer::remove(self, frame_id)
    }

    fn size(&self) -> usize {
        LruKReplacer::size(self)
    }
}
