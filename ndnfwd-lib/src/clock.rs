//! Time source injected into the pipeline so tests can control expiry
//! deterministically instead of racing `SystemTime::now()`.

use std::time::{SystemTime, UNIX_EPOCH};

pub trait Clock: Send + Sync {
    fn now_ns(&self) -> u64;

    fn now_sec(&self) -> u32 {
        (self.now_ns() / 1_000_000_000) as u32
    }
}

/// Wall-clock time, for production use.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ns(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64
    }
}

/// A fixed or manually-advanced clock for tests.
#[derive(Debug, Default)]
pub struct FakeClock {
    now_ns: std::sync::atomic::AtomicU64,
}

impl FakeClock {
    pub fn new(start_ns: u64) -> Self {
        Self {
            now_ns: std::sync::atomic::AtomicU64::new(start_ns),
        }
    }

    pub fn advance_ns(&self, delta_ns: u64) {
        self.now_ns.fetch_add(delta_ns, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn set_ns(&self, value_ns: u64) {
        self.now_ns.store(value_ns, std::sync::atomic::Ordering::SeqCst);
    }
}

impl Clock for FakeClock {
    fn now_ns(&self) -> u64 {
        self.now_ns.load(std::sync::atomic::Ordering::SeqCst)
    }
}
