//! OpenTelemetry instruments exporting the counter array and cache hit
//! ratio to Prometheus: build a `Meter`, declare one instrument per
//! series, read the process-wide [`MetricsSnapshot`] into them on scrape.

use super::counters::{CounterArray, MetricId};
use opentelemetry::global;
use opentelemetry::metrics::{Counter, Gauge, Meter};
use opentelemetry_sdk::metrics::SdkMeterProvider;
use prometheus::Registry;
use std::sync::Arc;

/// Exported OpenTelemetry instruments, one per `MetricId` plus a derived
/// cache-hit-ratio gauge.
pub struct OtelMetrics {
    counters: [Counter<u64>; MetricId::COUNT],
    cache_hit_ratio: Gauge<f64>,
}

impl OtelMetrics {
    fn new(meter: Meter) -> Self {
        let counters = MetricId::ALL.map(|id| {
            meter
                .u64_counter(format!("ndnfwd_{}_total", id.name()))
                .with_description(format!("Total {}", id.name().replace('_', " ")))
                .build()
        });
        let cache_hit_ratio = meter
            .f64_gauge("ndnfwd_cache_hit_ratio")
            .with_description("Content store hit ratio: hits / (hits + misses)")
            .build();
        Self {
            counters,
            cache_hit_ratio,
        }
    }

    /// Re-reads `array`'s current totals into the exported instruments.
    /// OpenTelemetry counters are monotonic adds, not absolute sets, so this
    /// records the delta since the last scrape.
    pub fn observe(&self, array: &CounterArray, last: &mut [u64; MetricId::COUNT]) {
        let snapshot = array.snapshot();
        for id in MetricId::ALL {
            let idx = id as usize;
            let delta = snapshot.values[idx].saturating_sub(last[idx]);
            if delta > 0 {
                self.counters[idx].add(delta, &[]);
            }
            last[idx] = snapshot.values[idx];
        }
        self.cache_hit_ratio.record(snapshot.cache_hit_ratio(), &[]);
    }
}

pub fn init_metrics() -> Result<(Arc<OtelMetrics>, Registry), Box<dyn std::error::Error + Send + Sync>>
{
    let registry = Registry::default();

    let exporter = opentelemetry_prometheus::exporter()
        .with_registry(registry.clone())
        .build()?;

    let meter_provider = SdkMeterProvider::builder().with_reader(exporter).build();
    global::set_meter_provider(meter_provider);

    let meter = global::meter("ndnfwd");
    Ok((Arc::new(OtelMetrics::new(meter)), registry))
}
