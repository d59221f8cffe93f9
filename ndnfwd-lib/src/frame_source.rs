//! The boundary a packet-capture shim plugs into. Attaching to a real
//! NIC/XDP program is out of scope for this crate; `FrameSource` is the
//! trait the capture layer would implement, and the binary ships one
//! reference implementation for local testing and benchmarking.

/// Delivers raw frames plus their ingress interface index to the pipeline.
/// Implementations decide how frames are captured (a NIC, a pcap file, a
/// synthetic generator); the core only needs `(bytes, ifindex)` pairs.
pub trait FrameSource {
    /// Returns the next available frame, or `None` when the source is
    /// exhausted (end of file, shutdown requested, etc).
    fn next_frame(&mut self) -> Option<(Vec<u8>, u32)>;
}
