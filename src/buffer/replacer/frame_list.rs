//! Arena-backed ordered queues of frame records.
//!
//! Records live in a [`FrameArena`] and are addressed by stable [`Handle`]s.
//! A [`FrameQueue`] is an intrusive doubly-linked order over handles, so
//! unlinking and re-appending a record is O(1) and never moves the record.
//!
//! ```text
//!  FrameArena.slots
//!  ┌────────┬────────┬────────┬────────┐
//!  │ node 0 │ node 1 │ (free) │ node 3 │
//!  └───┬────┴───▲─┬──┴────────┴──▲─────┘
//!      │ next   │ │ next         │
//!      └────────┘ └──────────────┘
//!  FrameQueue { head: 0, tail: 3, len: 3 }
//! ```
//!
//! A handle must only ever be linked into one queue at a time. The replacer
//! enforces this by storing the owning queue alongside the handle.

use super::record::FrameRecord;

/// Stable address of a record inside a [`FrameArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Handle(usize);

#[derive(Debug)]
struct Node {
    record: FrameRecord,
    prev: Option<Handle>,
    next: Option<Handle>,
}

/// Slab of record nodes with a free list for slot reuse.
#[derive(Debug, Default)]
pub(crate) struct FrameArena {
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
}

impl FrameArena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Store an unlinked record, reusing a free slot when one exists.
    pub(crate) fn insert(&mut self, record: FrameRecord) -> Handle {
        let node = Node {
            record,
            prev: None,
            next: None,
        };

        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                Handle(slot)
            }
            None => {
                self.slots.push(Some(node));
                Handle(self.slots.len() - 1)
            }
        }
    }

    /// Free the slot and hand back its record. The handle must already be unlinked.
    pub(crate) fn release(&mut self, handle: Handle) -> FrameRecord {
        let node = self.slots[handle.0].take().expect("stale frame handle");
        debug_assert!(node.prev.is_none() && node.next.is_none(), "released a linked node");
        self.free.push(handle.0);
        node.record
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &FrameRecord {
        &self.node(handle).record
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut FrameRecord {
        &mut self.node_mut(handle).record
    }

    /// Number of live records.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    #[inline]
    fn node(&self, handle: Handle) -> &Node {
        self.slots[handle.0].as_ref().expect("stale frame handle")
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node {
        self.slots[handle.0].as_mut().expect("stale frame handle")
    }
}

/// Doubly-linked order over arena handles (front = oldest).
#[derive(Debug, Default)]
pub(crate) struct FrameQueue {
    head: Option<Handle>,
    tail: Option<Handle>,
    len: usize,
}

impl FrameQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Link `handle` at the back of the queue.
    pub(crate) fn push_back(&mut self, arena: &mut FrameArena, handle: Handle) {
        {
            let node = arena.node_mut(handle);
            node.prev = self.tail;
            node.next = None;
        }

        match self.tail {
            Some(tail) => arena.node_mut(tail).next = Some(handle),
            None => self.head = Some(handle),
        }

        self.tail = Some(handle);
        self.len += 1;
    }

    /// Unlink `handle`. It must currently be linked into this queue.
    pub(crate) fn unlink(&mut self, arena: &mut FrameArena, handle: Handle) {
        let (prev, next) = {
            let node = arena.node_mut(handle);
            (node.prev.take(), node.next.take())
        };

        match prev {
            Some(prev) => arena.node_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => arena.node_mut(next).prev = prev,
            None => self.tail = prev,
        }

        self.len -= 1;
    }

    /// Move `handle` to the back (most recent position).
    pub(crate) fn move_to_back(&mut self, arena: &mut FrameArena, handle: Handle) {
        if self.tail == Some(handle) {
            return;
        }
        self.unlink(arena, handle);
        self.push_back(arena, handle);
    }

    /// Walk the queue front to back.
    pub(crate) fn iter<'a>(&self, arena: &'a FrameArena) -> Iter<'a> {
        Iter {
            arena,
            cursor: self.head,
        }
    }

    /// First handle, front to back, whose record matches `pred`.
    pub(crate) fn find<F>(&self, arena: &FrameArena, mut pred: F) -> Option<Handle>
    where
        F: FnMut(&FrameRecord) -> bool,
    {
        self.iter(arena)
            .find(|(_, record)| pred(record))
            .map(|(handle, _)| handle)
    }
}

/// Front-to-back iterator over a [`FrameQueue`].
pub(crate) struct Iter<'a> {
    arena: &'a FrameArena,
    cursor: Option<Handle>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (Handle, &'a FrameRecord);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.cursor?;
        let node = self.arena.node(handle);
        self.cursor = node.next;
        Some((handle, &node.record))
    }
}
