//! Integration tests for the replacer under concurrent use.
//!
//! These tests drive the replacer the way a buffer pool would: many worker
//! threads sharing one instance through `Arc<dyn Replacer>`.

use lruk_replacer::{FrameId, LruKReplacer, Replacer};
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 8;
const FRAMES_PER_THREAD: usize = 64;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Threads touching disjoint frames never lose an update.
#[test]
fn test_concurrent_disjoint_access() {
    init_logging();
    let replacer = Arc::new(LruKReplacer::new(THREADS * FRAMES_PER_THREAD, 2));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let replacer = Arc::clone(&replacer);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..FRAMES_PER_THREAD {
                    let frame_id = FrameId::new(t * FRAMES_PER_THREAD + i);
                    replacer.record_access(frame_id);
                    // Every other frame gets a second access and turns warm.
                    if i % 2 == 0 {
                        replacer.record_access(frame_id);
                    }
                    // Every fourth frame stays pinned.
                    if i % 4 == 0 {
                        replacer.set_evictable(frame_id, false);
                    }
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let total = THREADS * FRAMES_PER_THREAD;
    let pinned = THREADS * FRAMES_PER_THREAD / 4;
    assert_eq!(replacer.tracked_count(), total);
    assert_eq!(replacer.size(), total - pinned);
    assert_eq!(replacer.history_order().len(), total / 2);
    assert_eq!(replacer.cache_order().len(), total / 2);
    assert_eq!(replacer.stats().snapshot().promotions, (total / 2) as u64);
}

/// Concurrent evictors each get a distinct victim and never a pinned frame.
#[test]
fn test_concurrent_evict_hands_out_each_frame_once() {
    init_logging();
    let total = THREADS * FRAMES_PER_THREAD;
    let replacer: Arc<dyn Replacer> = Arc::new(LruKReplacer::new(total, 2));

    for id in 0..total {
        replacer.record_access(FrameId::new(id));
        if id % 3 == 0 {
            replacer.record_access(FrameId::new(id));
        }
    }
    let pinned: HashSet<FrameId> = (0..total).step_by(5).map(FrameId::new).collect();
    for &frame_id in &pinned {
        replacer.set_evictable(frame_id, false);
    }

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let replacer = Arc::clone(&replacer);
            thread::spawn(move || {
                let mut victims = Vec::new();
                while let Some(frame_id) = replacer.evict() {
                    victims.push(frame_id);
                }
                victims
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for h in handles {
        for frame_id in h.join().unwrap() {
            assert!(seen.insert(frame_id), "{} evicted twice", frame_id);
            assert!(!pinned.contains(&frame_id), "{} was pinned", frame_id);
        }
    }

    assert_eq!(seen.len(), total - pinned.len());
    assert_eq!(replacer.size(), 0);
}

/// Simulated pool: workers pin, touch and unpin frames while another thread
/// evicts and recycles them.
#[test]
fn test_pin_unpin_with_concurrent_eviction() {
    init_logging();
    let capacity = 32;
    let replacer = Arc::new(LruKReplacer::new(capacity, 2));

    for id in 0..capacity {
        replacer.record_access(FrameId::new(id));
    }

    let workers: Vec<_> = (0..4)
        .map(|t| {
            let replacer = Arc::clone(&replacer);
            thread::spawn(move || {
                for round in 0..500 {
                    let frame_id = FrameId::new((t * 7 + round) % capacity);
                    replacer.record_access(frame_id);
                    replacer.set_evictable(frame_id, false);
                    replacer.set_evictable(frame_id, true);
                }
            })
        })
        .collect();

    let evictor = {
        let replacer = Arc::clone(&replacer);
        thread::spawn(move || {
            let mut evicted = 0;
            for _ in 0..500 {
                if let Some(frame_id) = replacer.evict() {
                    // Reload the frame with a new page.
                    replacer.record_access(frame_id);
                    evicted += 1;
                }
            }
            evicted
        })
    };

    for w in workers {
        w.join().unwrap();
    }
    let evicted = evictor.join().unwrap();
    assert!(evicted > 0);

    // Every frame ends unpinned and tracked.
    assert_eq!(replacer.tracked_count(), capacity);
    assert_eq!(replacer.size(), capacity);

    let history = replacer.history_order();
    let cache = replacer.cache_order();
    assert_eq!(history.len() + cache.len(), capacity);

    let all: HashSet<FrameId> = history.into_iter().chain(cache).collect();
    assert_eq!(all.len(), capacity);
}
