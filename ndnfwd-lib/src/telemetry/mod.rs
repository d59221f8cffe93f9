pub mod counters;
pub mod events;
pub mod handler;
pub mod otel;
pub mod server;

pub use counters::{CounterArray, CounterShard, MetricId, MetricsSnapshot};
pub use events::{EventRecord, EventRing, EventType, EVENT_RING_BYTES};
pub use otel::{init_metrics, OtelMetrics};
pub use server::start_observability_server;
