use serde::Deserialize;

use crate::hashing::{HashAlgorithm, DEFAULT_HASH_CAP_BYTES};

fn default_true() -> bool {
    true
}

fn default_hash_cap_bytes() -> usize {
    DEFAULT_HASH_CAP_BYTES
}

fn default_userspace_fallback_threshold() -> u8 {
    0
}

fn default_ttl_sec() -> u32 {
    300
}

fn default_cs_max_size_bytes() -> usize {
    2048
}

fn default_cs_capacity() -> usize {
    32_768
}

fn default_pit_capacity() -> usize {
    4_096
}

fn default_nonce_capacity() -> usize {
    8_192
}

fn default_event_ring_bytes() -> usize {
    256 * 1024
}

fn default_observability_port() -> u16 {
    9000
}

/// Runtime configuration for the forwarding plane. Deserialized from
/// TOML, validated once on load, then held behind a single
/// `ArcSwap<Config>` slot so the control plane can hot-swap it without
/// locking the packet pipeline.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Name-hashing algorithm selected for the whole process.
    #[serde(default)]
    pub hash_algorithm: HashAlgorithm,

    /// Maximum number of leading name bytes folded into a name hash.
    #[serde(default = "default_hash_cap_bytes")]
    pub hash_cap_bytes: usize,

    /// Enables content-store lookups/inserts in the Interest/Data handlers.
    #[serde(default = "default_true")]
    pub cs_enabled: bool,

    /// Enables PIT and nonce-cache tracking in the Interest/Data handlers.
    #[serde(default = "default_true")]
    pub pit_enabled: bool,

    /// Enables the per-CPU counter array and event ring.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Hints that the capture layer is delivering zero-copy buffers; the
    /// pipeline itself never copies packet bytes either way, so this is
    /// informational for the control plane / benchmark harness.
    #[serde(default)]
    pub zero_copy_enabled: bool,

    /// Percent (0-100) chance of escalating an otherwise-forwardable
    /// Interest straight to the control plane instead of consulting the FIB.
    #[serde(default = "default_userspace_fallback_threshold")]
    pub userspace_fallback_threshold: u8,

    /// Default content-store TTL applied to Data cached from the wire.
    #[serde(default = "default_ttl_sec")]
    pub default_ttl_sec: u32,

    /// Maximum cached content length per content-store entry, in bytes.
    #[serde(default = "default_cs_max_size_bytes")]
    pub cs_max_size_bytes: usize,

    /// Content-store entry capacity.
    #[serde(default = "default_cs_capacity")]
    pub cs_capacity: usize,

    /// Pending-interest-table entry capacity.
    #[serde(default = "default_pit_capacity")]
    pub pit_capacity: usize,

    /// Nonce-cache entry capacity.
    #[serde(default = "default_nonce_capacity")]
    pub nonce_capacity: usize,

    /// Event ring capacity, expressed in bytes (converted to a record
    /// count at startup).
    #[serde(default = "default_event_ring_bytes")]
    pub event_ring_bytes: usize,

    /// Port the `/metrics` and `/health` HTTP surface listens on.
    #[serde(default = "default_observability_port")]
    pub observability_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hash_algorithm: HashAlgorithm::default(),
            hash_cap_bytes: default_hash_cap_bytes(),
            cs_enabled: default_true(),
            pit_enabled: default_true(),
            metrics_enabled: default_true(),
            zero_copy_enabled: false,
            userspace_fallback_threshold: default_userspace_fallback_threshold(),
            default_ttl_sec: default_ttl_sec(),
            cs_max_size_bytes: default_cs_max_size_bytes(),
            cs_capacity: default_cs_capacity(),
            pit_capacity: default_pit_capacity(),
            nonce_capacity: default_nonce_capacity(),
            event_ring_bytes: default_event_ring_bytes(),
            observability_port: default_observability_port(),
        }
    }
}
