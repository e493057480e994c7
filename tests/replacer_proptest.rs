//! Property tests: the replacer must agree with a naive two-queue model on
//! every operation sequence.

use lruk_replacer::{FrameId, LruKReplacer};
use proptest::prelude::*;

/// Largest accepted frame id.
const CAPACITY: usize = 12;

#[derive(Debug, Clone)]
enum Op {
    Access(usize),
    SetEvictable(usize, bool),
    Evict,
    Remove(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..=CAPACITY).prop_map(Op::Access),
        2 => (0..=CAPACITY, any::<bool>()).prop_map(|(id, e)| Op::SetEvictable(id, e)),
        2 => Just(Op::Evict),
        1 => (0..=CAPACITY).prop_map(Op::Remove),
    ]
}

#[derive(Debug)]
struct Entry {
    id: usize,
    count: usize,
    evictable: bool,
}

/// Linear-scan reference: two Vecs, front = next victim.
#[derive(Debug)]
struct Model {
    k: usize,
    history: Vec<Entry>,
    cache: Vec<Entry>,
}

impl Model {
    fn new(k: usize) -> Self {
        Self {
            k,
            history: Vec::new(),
            cache: Vec::new(),
        }
    }

    fn access(&mut self, id: usize) {
        if let Some(pos) = self.cache.iter().position(|e| e.id == id) {
            let mut entry = self.cache.remove(pos);
            entry.count += 1;
            self.cache.push(entry);
        } else if let Some(pos) = self.history.iter().position(|e| e.id == id) {
            self.history[pos].count += 1;
            if self.history[pos].count >= self.k {
                let entry = self.history.remove(pos);
                self.cache.push(entry);
            }
        } else {
            let entry = Entry {
                id,
                count: 1,
                evictable: true,
            };
            if self.k <= 1 {
                self.cache.push(entry);
            } else {
                self.history.push(entry);
            }
        }
    }

    fn entry(&mut self, id: usize) -> Option<&mut Entry> {
        self.history
            .iter_mut()
            .chain(self.cache.iter_mut())
            .find(|e| e.id == id)
    }

    fn set_evictable(&mut self, id: usize, evictable: bool) {
        if let Some(entry) = self.entry(id) {
            entry.evictable = evictable;
        }
    }

    fn evict(&mut self) -> Option<usize> {
        for queue in [&mut self.history, &mut self.cache] {
            if let Some(pos) = queue.iter().position(|e| e.evictable) {
                return Some(queue.remove(pos).id);
            }
        }
        None
    }

    /// Returns false if the frame is pinned (the call would be a contract violation).
    fn remove(&mut self, id: usize) -> bool {
        for queue in [&mut self.history, &mut self.cache] {
            if let Some(pos) = queue.iter().position(|e| e.id == id) {
                if !queue[pos].evictable {
                    return false;
                }
                queue.remove(pos);
            }
        }
        true
    }

    fn size(&self) -> usize {
        self.history
            .iter()
            .chain(self.cache.iter())
            .filter(|e| e.evictable)
            .count()
    }

    fn order(queue: &[Entry]) -> Vec<FrameId> {
        queue.iter().map(|e| FrameId::new(e.id)).collect()
    }
}

proptest! {
    #[test]
    fn test_matches_reference_model(
        k in 1usize..4,
        ops in prop::collection::vec(op_strategy(), 1..200),
    ) {
        let replacer = LruKReplacer::new(CAPACITY, k);
        let mut model = Model::new(k);

        for op in ops {
            match op {
                Op::Access(id) => {
                    replacer.record_access(FrameId::new(id));
                    model.access(id);
                }
                Op::SetEvictable(id, evictable) => {
                    replacer.set_evictable(FrameId::new(id), evictable);
                    model.set_evictable(id, evictable);
                }
                Op::Evict => {
                    let expected = model.evict().map(FrameId::new);
                    prop_assert_eq!(replacer.evict(), expected);
                }
                Op::Remove(id) => {
                    if model.remove(id) {
                        replacer.remove(FrameId::new(id));
                    }
                }
            }

            prop_assert_eq!(replacer.size(), model.size());
            prop_assert_eq!(replacer.history_order(), Model::order(&model.history));
            prop_assert_eq!(replacer.cache_order(), Model::order(&model.cache));
        }
    }

    #[test]
    fn test_pinned_frames_never_evicted(
        pinned in prop::collection::hash_set(0..CAPACITY, 0..CAPACITY),
        accesses in prop::collection::vec(0..CAPACITY, 0..100),
    ) {
        let replacer = LruKReplacer::new(CAPACITY, 2);
        for &id in &accesses {
            replacer.record_access(FrameId::new(id));
        }
        for &id in &pinned {
            replacer.set_evictable(FrameId::new(id), false);
        }

        let tracked = replacer.tracked_count();
        let mut evicted = 0;
        while let Some(frame_id) = replacer.evict() {
            prop_assert!(!pinned.contains(&frame_id.0));
            evicted += 1;
        }

        prop_assert_eq!(replacer.size(), 0);
        prop_assert_eq!(replacer.tracked_count(), tracked - evicted);
        for frame_id in replacer.history_order().into_iter().chain(replacer.cache_order()) {
            prop_assert!(pinned.contains(&frame_id.0));
        }
    }
}
