//! Per-CPU metric counter array.
//!
//! Each worker shard owns its own `[AtomicU64; MetricId::COUNT]`, updated
//! with a relaxed fetch-add — no CAS loop, no lock. Each counter is
//! logically per-CPU; summing across shards into one total is the
//! reader's job, not the writer's.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum MetricId {
    InterestsRecv = 0,
    DataRecv = 1,
    NacksRecv = 2,
    CacheHits = 3,
    CacheMisses = 4,
    CacheInserts = 5,
    Redirects = 6,
    Drops = 7,
    Errors = 8,
}

impl MetricId {
    pub const COUNT: usize = 9;

    pub const ALL: [MetricId; Self::COUNT] = [
        MetricId::InterestsRecv,
        MetricId::DataRecv,
        MetricId::NacksRecv,
        MetricId::CacheHits,
        MetricId::CacheMisses,
        MetricId::CacheInserts,
        MetricId::Redirects,
        MetricId::Drops,
        MetricId::Errors,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MetricId::InterestsRecv => "interests_recv",
            MetricId::DataRecv => "data_recv",
            MetricId::NacksRecv => "nacks_recv",
            MetricId::CacheHits => "cache_hits",
            MetricId::CacheMisses => "cache_misses",
            MetricId::CacheInserts => "cache_inserts",
            MetricId::Redirects => "redirects",
            MetricId::Drops => "drops",
            MetricId::Errors => "errors",
        }
    }
}

/// One shard's worth of counters. `Router` holds one per worker; readers
/// sum across shards to get a process-wide total.
#[derive(Default)]
pub struct CounterShard {
    counters: [AtomicU64; MetricId::COUNT],
}

impl CounterShard {
    pub fn new() -> Self {
        Self {
            counters: Default::default(),
        }
    }

    #[inline]
    pub fn incr(&self, id: MetricId) {
        self.counters[id as usize].fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn get(&self, id: MetricId) -> u64 {
        self.counters[id as usize].load(Ordering::Relaxed)
    }
}

/// A read-only, process-wide sum of every shard, taken at one instant.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub values: [u64; MetricId::COUNT],
}

impl MetricsSnapshot {
    pub fn get(&self, id: MetricId) -> u64 {
        self.values[id as usize]
    }

    /// `hits / (hits + misses)`, `0.0` when there have been no lookups yet.
    pub fn cache_hit_ratio(&self) -> f64 {
        let hits = self.get(MetricId::CacheHits) as f64;
        let misses = self.get(MetricId::CacheMisses) as f64;
        if hits + misses == 0.0 {
            0.0
        } else {
            hits / (hits + misses)
        }
    }
}

/// Owns every shard and reduces them into a [`MetricsSnapshot`] on demand.
pub struct CounterArray {
    shards: Vec<CounterShard>,
}

impl CounterArray {
    pub fn new(shard_count: usize) -> Self {
        let shard_count = shard_count.max(1);
        Self {
            shards: (0..shard_count).map(|_| CounterShard::new()).collect(),
        }
    }

    pub fn shard(&self, index: usize) -> &CounterShard {
        &self.shards[index % self.shards.len()]
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let mut values = [0u64; MetricId::COUNT];
        for shard in &self.shards {
            for id in MetricId::ALL {
                values[id as usize] += shard.get(id);
            }
        }
        MetricsSnapshot { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_sums_across_shards() {
        let arr = CounterArray::new(2);
        arr.shard(0).incr(MetricId::InterestsRecv);
        arr.shard(1).incr(MetricId::InterestsRecv);
        let snap = arr.snapshot();
        assert_eq!(snap.get(MetricId::InterestsRecv), 2);
    }

    #[test]
    fn hit_ratio_is_zero_with_no_lookups() {
        let snap = MetricsSnapshot::default();
        assert_eq!(snap.cache_hit_ratio(), 0.0);
    }

    #[test]
    fn hit_ratio_computed_correctly() {
        let arr = CounterArray::new(1);
        arr.shard(0).incr(MetricId::CacheHits);
        arr.shard(0).incr(MetricId::CacheHits);
        arr.shard(0).incr(MetricId::CacheHits);
        arr.shard(0).incr(MetricId::CacheMisses);
        let snap = arr.snapshot();
        assert!((snap.cache_hit_ratio() - 0.75).abs() < 1e-9);
    }
}
