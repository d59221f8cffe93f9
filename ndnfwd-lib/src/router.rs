//! `Router`: the single context bundling CS, PIT, nonce cache, FIB,
//! metrics, events and config that every pipeline entry point is passed
//! explicitly, rather than reaching for global mutable state.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use arc_swap::ArcSwap;
use bytes::Bytes;
use tracing::debug;

use crate::clock::Clock;
use crate::config::Config;
use crate::error::NdnError;
use crate::hashing::HashAlgorithm;
use crate::packet::data::find_content_tlv;
use crate::packet::demux::{self, DemuxResult, NDN_TYPE_DATA, NDN_TYPE_INTEREST, NDN_TYPE_NACK};
use crate::packet::interest::{nonce_with_source, probabilistic_fallback};
use crate::packet::name::locate_and_hash_name;
use crate::packet::Verdict;
use crate::tables::{ContentStore, Fib, NonceCache, PendingInterestTable, PitEntry};
use crate::telemetry::{CounterArray, EventRecord, EventRing, EventType, MetricId, MetricsSnapshot};

/// Default Interest lifetime installed into the PIT.
const INTEREST_LIFETIME_MS: u32 = 4000;

pub struct Router {
    config: ArcSwap<Config>,
    cs: Mutex<ContentStore>,
    pit: Mutex<PendingInterestTable>,
    nonce_cache: Mutex<NonceCache>,
    fib: RwLock<Fib>,
    counters: CounterArray,
    events: EventRing,
    clock: Arc<dyn Clock>,
    next_shard: AtomicUsize,
}

impl Router {
    pub fn new(config: Config, clock: Arc<dyn Clock>, shard_count: usize) -> Self {
        let cs = ContentStore::new(config.cs_capacity, config.cs_max_size_bytes);
        let pit = PendingInterestTable::new(config.pit_capacity);
        let nonce_cache = NonceCache::new(config.nonce_capacity);
        let events = EventRing::with_byte_budget(config.event_ring_bytes);
        Self {
            config: ArcSwap::from_pointee(config),
            cs: Mutex::new(cs),
            pit: Mutex::new(pit),
            nonce_cache: Mutex::new(nonce_cache),
            fib: RwLock::new(Fib::new()),
            counters: CounterArray::new(shard_count),
            events,
            clock,
            next_shard: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> Arc<Config> {
        self.config.load_full()
    }

    /// Atomically swaps in a new configuration, per the single-slot,
    /// atomic-swap discipline required of the config resource.
    pub fn set_config(&self, config: Config) {
        self.config.store(Arc::new(config));
    }

    pub fn fib_upsert(&self, name_hash: u64, egress_ifindex: u32) {
        let mut fib = self.fib.write().unwrap_or_else(|p| p.into_inner());
        fib.upsert(name_hash, egress_ifindex);
    }

    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.counters.snapshot()
    }

    pub fn counters(&self) -> &CounterArray {
        &self.counters
    }

    pub fn drain_events(&self, max: usize) -> Vec<EventRecord> {
        self.events.drain(max)
    }

    pub fn cs_len(&self) -> usize {
        self.cs.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn pit_len(&self) -> usize {
        self.pit.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    /// Assigns this calling thread a fixed shard index on first use so its
    /// counter updates never contend with another worker thread's.
    fn shard_for_this_thread(&self) -> usize {
        thread_local! {
            static SHARD: std::cell::Cell<Option<usize>> = const { std::cell::Cell::new(None) };
        }
        SHARD.with(|cell| {
            if let Some(idx) = cell.get() {
                return idx;
            }
            let idx = self.next_shard.fetch_add(1, Ordering::Relaxed);
            cell.set(Some(idx));
            idx
        })
    }

    /// Entry point: decodes one raw frame and returns a verdict.
    /// Never panics, never reads outside `frame`, and always returns
    /// exactly one verdict.
    pub fn process_frame(&self, frame: &[u8], ingress_ifindex: u32) -> Verdict {
        let start_ns = self.clock.now_ns();
        let shard = self.counters.shard(self.shard_for_this_thread());

        let payload_offset = match demux::demux(frame) {
            DemuxResult::Ndn { payload_offset } => payload_offset,
            DemuxResult::NotNdn => return Verdict::Pass,
        };

        let config = self.config.load();
        let algo = config.hash_algorithm;

        let (outer_type, _outer_len, name_offset) = match crate::tlv::decode_header(frame, payload_offset) {
            Ok(v) => v,
            Err(_) => {
                shard.incr(MetricId::Errors);
                return Verdict::Pass;
            }
        };

        match outer_type {
            NDN_TYPE_INTEREST => {
                self.handle_interest(frame, name_offset, ingress_ifindex, &config, algo, shard, start_ns)
            }
            NDN_TYPE_DATA => {
                self.handle_data(frame, name_offset, ingress_ifindex, &config, algo, shard, start_ns)
            }
            NDN_TYPE_NACK => {
                shard.incr(MetricId::NacksRecv);
                Verdict::Pass
            }
            _ => Verdict::Pass,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn handle_interest(
        &self,
        frame: &[u8],
        name_offset: usize,
        ingress_ifindex: u32,
        config: &Config,
        algo: HashAlgorithm,
        shard: &crate::telemetry::CounterShard,
        start_ns: u64,
    ) -> Verdict {
        let (name_hash, after_name) = match locate_and_hash_name(frame, name_offset, algo, config.hash_cap_bytes) {
            Ok(v) => v,
            Err(_) => {
                shard.incr(MetricId::Errors);
                return Verdict::Pass;
            }
        };
        shard.incr(MetricId::InterestsRecv);

        let now_sec = self.clock.now_sec();
        let now_ns = self.clock.now_ns();

        if config.cs_enabled {
            let mut cs = self.cs.lock().unwrap_or_else(|p| p.into_inner());
            let hit = cs.lookup(name_hash, now_sec).is_some();
            drop(cs);
            if hit {
                shard.incr(MetricId::CacheHits);
                self.emit_event(
                    EventType::CacheHit,
                    name_hash,
                    frame.len() as u32,
                    Verdict::Pass,
                    start_ns,
                );
                return Verdict::Pass;
            } else {
                shard.incr(MetricId::CacheMisses);
            }
        }

        if config.pit_enabled {
            let (nonce, _source) = nonce_with_source(frame, after_name, frame.len(), name_hash);

            let duplicate = {
                let mut nonces = self.nonce_cache.lock().unwrap_or_else(|p| p.into_inner());
                nonces.check_and_refresh(nonce, now_ns)
            };
            if duplicate {
                shard.incr(MetricId::Drops);
                self.emit_event(
                    EventType::DuplicateInterest,
                    name_hash,
                    frame.len() as u32,
                    Verdict::Drop,
                    start_ns,
                );
                return Verdict::Drop;
            }

            let mut pit = self.pit.lock().unwrap_or_else(|p| p.into_inner());
            pit.insert_or_refresh(
                name_hash,
                PitEntry {
                    arrival_time_ns: now_ns,
                    lifetime_ms: INTEREST_LIFETIME_MS,
                    ingress_ifindex,
                    nonce,
                    hop_count: 0,
                },
            );
        }

        if probabilistic_fallback(config.userspace_fallback_threshold) {
            self.emit_event(
                EventType::UserspaceFallback,
                name_hash,
                frame.len() as u32,
                Verdict::Pass,
                start_ns,
            );
            return Verdict::Pass;
        }

        let fib = self.fib.read().unwrap_or_else(|p| p.into_inner());
        if let Some(egress) = fib.resolve(name_hash, ingress_ifindex) {
            drop(fib);
            shard.incr(MetricId::Redirects);
            return Verdict::Redirect(egress);
        }

        Verdict::Pass
    }

    #[allow(clippy::too_many_arguments)]
    fn handle_data(
        &self,
        frame: &[u8],
        name_offset: usize,
        current_ifindex: u32,
        config: &Config,
        algo: HashAlgorithm,
        shard: &crate::telemetry::CounterShard,
        start_ns: u64,
    ) -> Verdict {
        let (name_hash, after_name) = match locate_and_hash_name(frame, name_offset, algo, config.hash_cap_bytes) {
            Ok(v) => v,
            Err(_) => {
                shard.incr(MetricId::Errors);
                return Verdict::Pass;
            }
        };
        shard.incr(MetricId::DataRecv);

        if !config.pit_enabled {
            return Verdict::Pass;
        }

        let now_ns = self.clock.now_ns();
        let now_sec = self.clock.now_sec();

        let pending = {
            let mut pit = self.pit.lock().unwrap_or_else(|p| p.into_inner());
            pit.take(name_hash, now_ns)
        };

        let Some(pending) = pending else {
            shard.incr(MetricId::Drops);
            self.emit_event(
                EventType::UnsolicitedData,
                name_hash,
                frame.len() as u32,
                Verdict::Drop,
                start_ns,
            );
            return Verdict::Drop;
        };

        if config.cs_enabled {
            if let Some((content_offset, content_len)) = find_content_tlv(frame, after_name, frame.len()) {
                if content_len <= config.cs_max_size_bytes {
                    let content = Bytes::copy_from_slice(&frame[content_offset..content_offset + content_len]);
                    let mut cs = self.cs.lock().unwrap_or_else(|p| p.into_inner());
                    if cs.insert(name_hash, content, config.default_ttl_sec, now_sec) {
                        shard.incr(MetricId::CacheInserts);
                        self.emit_event(
                            EventType::ContentCached,
                            name_hash,
                            frame.len() as u32,
                            Verdict::Pass,
                            start_ns,
                        );
                    }
                }
            }
        }

        if pending.ingress_ifindex != current_ifindex {
            shard.incr(MetricId::Redirects);
            return Verdict::Redirect(pending.ingress_ifindex);
        }

        Verdict::Pass
    }

    fn emit_event(&self, event_type: EventType, name_hash: u64, packet_size: u32, verdict: Verdict, start_ns: u64) {
        let now_ns = self.clock.now_ns();
        self.events.submit(EventRecord {
            timestamp_ns: now_ns,
            event_type,
            name_hash,
            packet_size,
            action_taken: verdict,
            processing_time_ns: now_ns.saturating_sub(start_ns),
        });
        debug!(?event_type, name_hash, packet_size, "pipeline event");
    }
}

pub type RouterError = NdnError;
