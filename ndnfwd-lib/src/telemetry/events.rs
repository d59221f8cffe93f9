//! Bounded event ring.
//!
//! Producers (the pipeline) never block: `submit` drops the event silently
//! when the ring is full and does **not** increment `errors`; event loss
//! is tolerated. Consumers (the control plane) drain with `drain`.
//!
//! This is a `Mutex`-guarded `VecDeque` rather than a lock-free ring; the
//! critical section is a single O(1) push/pop, which keeps producers from
//! blocking on each other for any meaningful duration without requiring
//! unsafe wait-free machinery. See `DESIGN.md` for the tradeoff.

use crate::packet::Verdict;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    CacheHit,
    DuplicateInterest,
    UserspaceFallback,
    UnsolicitedData,
    ContentCached,
}

#[derive(Debug, Clone, Copy)]
pub struct EventRecord {
    pub timestamp_ns: u64,
    pub event_type: EventType,
    pub name_hash: u64,
    pub packet_size: u32,
    pub action_taken: Verdict,
    pub processing_time_ns: u64,
}

/// Approximate capacity in records for a 256 KiB ring, per the resource cap
/// in the concurrency model (`size_of::<EventRecord>()` is small and fixed,
/// so this is a compile-time constant rather than a runtime byte budget).
pub const EVENT_RING_BYTES: usize = 256 * 1024;

pub struct EventRing {
    capacity: usize,
    records: Mutex<VecDeque<EventRecord>>,
}

impl EventRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            records: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
        }
    }

    pub fn with_byte_budget(ring_bytes: usize) -> Self {
        let per_record = std::mem::size_of::<EventRecord>().max(1);
        Self::new(ring_bytes / per_record)
    }

    /// Attempts to push `record`. Silently drops it if the ring is full.
    pub fn submit(&self, record: EventRecord) {
        let mut guard = match self.records.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        if guard.len() >= self.capacity {
            return;
        }
        guard.push_back(record);
    }

    /// Drains up to `max` pending events for the control plane.
    pub fn drain(&self, max: usize) -> Vec<EventRecord> {
        let mut guard = match self.records.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        let n = max.min(guard.len());
        guard.drain(..n).collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
