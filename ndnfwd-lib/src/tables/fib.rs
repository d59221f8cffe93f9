//! Forwarding information base: a plain, non-evicting map from name
//! hash to egress interface, written by the control plane and read by the
//! pipeline. Longest-prefix matching is explicitly out of scope; the
//! control plane installs one entry per fully-qualified name hash.

use ahash::AHashMap;

pub struct Fib {
    table: AHashMap<u64, u32>,
}

impl Default for Fib {
    fn default() -> Self {
        Self::new()
    }
}

impl Fib {
    pub fn new() -> Self {
        Self {
            table: AHashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn lookup(&self, hash: u64) -> Option<u32> {
        self.table.get(&hash).copied()
    }

    /// Upserts `hash -> egress_ifindex`. An `egress_ifindex` of 0 deletes
    /// the entry, per the control-plane write contract.
    pub fn upsert(&mut self, hash: u64, egress_ifindex: u32) {
        if egress_ifindex == 0 {
            self.table.remove(&hash);
        } else {
            self.table.insert(hash, egress_ifindex);
        }
    }

    /// Resolves a usable egress interface for `hash`, applying the
    /// loopback guard: an entry equal to 0 or to `ingress_ifindex` is
    /// ignored rather than honored.
    pub fn resolve(&self, hash: u64, ingress_ifindex: u32) -> Option<u32> {
        match self.lookup(hash) {
            Some(ifindex) if ifindex != 0 && ifindex != ingress_ifindex => Some(ifindex),
            _ => None,
        }
    }
}
