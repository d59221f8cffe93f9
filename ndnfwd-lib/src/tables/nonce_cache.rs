//! Nonce cache: coarse duplicate-Interest suppression over a sliding
//! 1-second window.
//!
//! Using the low 32 bits of the name hash as a pseudo-nonce conflates
//! name-identity with nonce-identity and will suppress legitimate
//! retransmissions of the same name, so this cache always prefers a real
//! parsed Nonce TLV (`0x0A`) and only falls back to the pseudo-nonce when
//! the TLV walk in [`crate::packet`] doesn't find one — see
//! `packet::interest::extract_nonce_or_pseudo`.

use super::lru::LruTable;

const DUPLICATE_WINDOW_NS: u64 = 1_000_000_000;

pub struct NonceCache {
    table: LruTable<u32, u64>,
}

impl NonceCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            table: LruTable::new(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if `nonce` was seen within the last second. Either
    /// way, `now_ns` is written back as the new last-seen time (LRU
    /// refresh), matching the source's "check, then always refresh" order.
    pub fn check_and_refresh(&mut self, nonce: u32, now_ns: u64) -> bool {
        let duplicate = match self.table.get(&nonce) {
            Some(&last_seen_ns) => now_ns.saturating_sub(last_seen_ns) < DUPLICATE_WINDOW_NS,
            None => false,
        };
        self.table.insert(nonce, now_ns);
        duplicate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sighting_is_not_a_duplicate() {
        let mut nc = NonceCache::new(4);
        assert!(!nc.check_and_refresh(1, 0));
    }

    #[test]
    fn within_window_is_duplicate() {
        let mut nc = NonceCache::new(4);
        nc.check_and_refresh(1, 0);
        assert!(nc.check_and_refresh(1, 999_000_000));
    }

    #[test]
    fn outside_window_is_not_duplicate() {
        let mut nc = NonceCache::new(4);
        nc.check_and_refresh(1, 0);
        assert!(!nc.check_and_refresh(1, 1_001_000_000));
    }
}
