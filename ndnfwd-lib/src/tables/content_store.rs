//! Content store: an LRU cache of name-hash to Data payload.

use super::lru::LruTable;
use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct ContentStoreEntry {
    pub insertion_time_sec: u32,
    pub ttl_sec: u32,
    pub content: Bytes,
    pub content_type: u8,
    pub flags: u8,
}

impl ContentStoreEntry {
    pub fn is_valid(&self, now_sec: u32) -> bool {
        now_sec < self.insertion_time_sec.saturating_add(self.ttl_sec)
    }
}

/// LRU map of name-hash to cached Data, with lazy TTL expiry.
pub struct ContentStore {
    table: LruTable<u64, ContentStoreEntry>,
    max_content_bytes: usize,
}

impl ContentStore {
    pub fn new(capacity: usize, max_content_bytes: usize) -> Self {
        Self {
            table: LruTable::new(capacity),
            max_content_bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Looks up `hash`. An expired entry is treated as absent: callers see
    /// `None`, exactly as if nothing had ever been inserted.
    pub fn lookup(&mut self, hash: u64, now_sec: u32) -> Option<&ContentStoreEntry> {
        let entry = self.table.get(&hash)?;
        if entry.is_valid(now_sec) {
            self.table.get(&hash)
        } else {
            None
        }
    }

    /// Inserts `content` under `hash` with the given TTL. Rejects content
    /// larger than the configured cap; the caller should treat that as a
    /// silent no-op, not an error (per the resource-full policy: silent).
    pub fn insert(&mut self, hash: u64, content: Bytes, ttl_sec: u32, now_sec: u32) -> bool {
        if content.len() > self.max_content_bytes {
            return false;
        }
        self.table.insert(
            hash,
            ContentStoreEntry {
                insertion_time_sec: now_sec,
                ttl_sec,
                content,
                content_type: 0,
                flags: 0,
            },
        );
        true
    }

    /// Metadata-only iteration for control-plane inspection (no content
    /// bytes), per the external-interfaces contract.
    pub fn iter_metadata(&self) -> impl Iterator<Item = (u64, u32, u32, usize)> + '_ {
        self.table
            .iter()
            .map(|(&h, e)| (h, e.insertion_time_sec, e.insertion_time_sec + e.ttl_sec, e.content.len()))
    }
}
