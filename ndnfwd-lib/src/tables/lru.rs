//! A small, dependency-free LRU map shared by the content store, PIT and
//! nonce cache. Capacity-bounded, O(1) `get`/`insert`/`remove`, strict LRU
//! eviction on both read and write.
//!
//! Entries live in a `Vec`-backed arena linked into a doubly-linked list so
//! that moving an entry to the front on access is O(1) without touching the
//! hash map itself; the map only ever stores arena indices.

use ahash::AHashMap;
use std::hash::Hash;

type Index = usize;
const NIL: Index = usize::MAX;

struct Node<K, V> {
    key: K,
    value: V,
    prev: Index,
    next: Index,
}

/// A fixed-capacity, strict-LRU map.
pub struct LruTable<K, V> {
    capacity: usize,
    nodes: Vec<Option<Node<K, V>>>,
    index: AHashMap<K, Index>,
    head: Index, // most recently used
    tail: Index, // least recently used
    free: Vec<Index>,
}

impl<K, V> LruTable<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "LruTable capacity must be positive");
        Self {
            capacity,
            nodes: Vec::with_capacity(capacity),
            index: AHashMap::with_capacity(capacity),
            head: NIL,
            tail: NIL,
            free: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the value for `key`, promoting it to most-recently-used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.touch(idx);
        self.nodes[idx].as_ref().map(|n| &n.value)
    }

    /// Returns a mutable value for `key` without changing recency — used by
    /// callers that only want to inspect/update in place after a prior
    /// `get`/`insert` already established recency this packet.
    pub fn peek_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = *self.index.get(key)?;
        self.nodes[idx].as_mut().map(|n| &mut n.value)
    }

    /// Inserts or overwrites `key`, promoting it to most-recently-used.
    /// Evicts the least-recently-used entry first if the map is full and
    /// `key` is not already present.
    pub fn insert(&mut self, key: K, value: V) {
        if let Some(&idx) = self.index.get(&key) {
            if let Some(node) = self.nodes[idx].as_mut() {
                node.value = value;
            }
            self.touch(idx);
            return;
        }

        if self.index.len() >= self.capacity {
            self.evict_lru();
        }

        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(Node {
                    key: key.clone(),
                    value,
                    prev: NIL,
                    next: NIL,
                });
                idx
            }
            None => {
                self.nodes.push(Some(Node {
                    key: key.clone(),
                    value,
                    prev: NIL,
                    next: NIL,
                }));
                self.nodes.len() - 1
            }
        };

        self.index.insert(key, idx);
        self.push_front(idx);
    }

    /// Removes and returns `key`'s value, if present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.index.remove(key)?;
        self.unlink(idx);
        self.free.push(idx);
        self.nodes[idx].take().map(|n| n.value)
    }

    fn evict_lru(&mut self) {
        if self.tail == NIL {
            return;
        }
        let victim = self.tail;
        if let Some(node) = self.nodes[victim].as_ref() {
            let key = node.key.clone();
            self.index.remove(&key);
        }
        self.unlink(victim);
        self.free.push(victim);
        self.nodes[victim] = None;
    }

    fn touch(&mut self, idx: Index) {
        if self.head == idx {
            return;
        }
        self.unlink(idx);
        self.push_front(idx);
    }

    fn unlink(&mut self, idx: Index) {
        let (prev, next) = match self.nodes[idx].as_ref() {
            Some(n) => (n.prev, n.next),
            None => return,
        };
        if prev != NIL {
            if let Some(n) = self.nodes[prev].as_mut() {
                n.next = next;
            }
        } else {
            self.head = next;
        }
        if next != NIL {
            if let Some(n) = self.nodes[next].as_mut() {
                n.prev = prev;
            }
        } else {
            self.tail = prev;
        }
        if let Some(n) = self.nodes[idx].as_mut() {
            n.prev = NIL;
            n.next = NIL;
        }
    }

    fn push_front(&mut self, idx: Index) {
        let old_head = self.head;
        if let Some(n) = self.nodes[idx].as_mut() {
            n.prev = NIL;
            n.next = old_head;
        }
        if old_head != NIL {
            if let Some(n) = self.nodes[old_head].as_mut() {
                n.prev = idx;
            }
        }
        self.head = idx;
        if self.tail == NIL {
            self.tail = idx;
        }
    }

    /// Iterates entries in no particular order; used by control-plane
    /// inspection, never on the hot path.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.index
            .iter()
            .filter_map(|(k, &idx)| self.nodes[idx].as_ref().map(|n| (k, &n.value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get_roundtrip() {
        let mut t: LruTable<u64, &'static str> = LruTable::new(2);
        t.insert(1, "a");
        assert_eq!(t.get(&1), Some(&"a"));
    }

    #[test]
    fn eviction_is_strict_lru() {
        let mut t: LruTable<u64, u32> = LruTable::new(2);
        t.insert(1, 10);
        t.insert(2, 20);
        // touch 1 so 2 becomes LRU
        assert_eq!(t.get(&1), Some(&10));
        t.insert(3, 30);
        assert_eq!(t.get(&2), None, "2 should have been evicted as LRU");
        assert_eq!(t.get(&1), Some(&10));
        assert_eq!(t.get(&3), Some(&30));
    }

    #[test]
    fn remove_then_reinsert_works() {
        let mut t: LruTable<u64, u32> = LruTable::new(2);
        t.insert(1, 10);
        assert_eq!(t.remove(&1), Some(10));
        assert_eq!(t.len(), 0);
        t.insert(1, 11);
        assert_eq!(t.get(&1), Some(&11));
    }

    #[test]
    fn full_at_insertion_makes_new_entry_present_immediately() {
        let mut t: LruTable<u64, u32> = LruTable::new(1);
        t.insert(1, 10);
        t.insert(2, 20);
        assert_eq!(t.len(), 1);
        assert_eq!(t.get(&2), Some(&20));
    }

    #[test]
    fn reused_slot_after_remove_does_not_corrupt_list() {
        let mut t: LruTable<u64, u32> = LruTable::new(3);
        t.insert(1, 10);
        t.insert(2, 20);
        t.insert(3, 30);
        t.remove(&2);
        t.insert(4, 40);
        assert_eq!(t.len(), 3);
        assert_eq!(t.get(&1), Some(&10));
        assert_eq!(t.get(&3), Some(&30));
        assert_eq!(t.get(&4), Some(&40));
    }
}
