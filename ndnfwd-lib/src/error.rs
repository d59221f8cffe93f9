use thiserror::Error;

/// Errors surfaced while decoding a single TLV Type or Length field.
///
/// These never escape the packet pipeline as a `Result::Err` (see
/// [`crate::packet::Verdict`]); they exist so the decoder stays a pure,
/// total function and the pipeline can log a precise reason before folding
/// the failure into the `errors` counter.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlvError {
    #[error("TLV read would run past the end of the buffer")]
    Truncated,

    #[error("8-byte TLV length prefix is not supported on the fast path")]
    UnsupportedLength,
}

/// Higher-level decode/policy failures raised while walking a packet.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NdnError {
    #[error(transparent)]
    Tlv(#[from] TlvError),

    #[error("packet is missing a required Name TLV or an inner TLV type is unexpected")]
    MalformedNdn,
}

/// Errors raised by the configuration and control-plane surface.
#[derive(Error, Debug)]
pub enum NdnfwdError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

pub type Result<T> = std::result::Result<T, NdnfwdError>;
