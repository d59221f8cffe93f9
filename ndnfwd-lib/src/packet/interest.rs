//! Interest handling.

use crate::error::NdnError;
use crate::tlv;

use super::demux::{NDN_TYPE_INTEREST_LIFETIME, NDN_TYPE_NONCE};

/// Walks the TLVs following the Name TLV looking for a Nonce (`0x0A`).
/// Stops at the first unrecognised TLV that clearly isn't part of the
/// Interest's well-known prefix (InterestLifetime, etc.) to bound the walk.
///
/// Returns the real nonce when found; `None` when the Interest has none or
/// the TLV is malformed, in which case the caller falls back to a
/// pseudo-nonce derived from the name hash (see the nonce-cache module
/// doc comment for the correctness caveat this carries).
pub fn extract_real_nonce(packet: &[u8], mut offset: usize, packet_end: usize) -> Option<u32> {
    const MAX_TLVS_WALKED: usize = 16;
    for _ in 0..MAX_TLVS_WALKED {
        if offset >= packet_end {
            return None;
        }
        let (ty, len, value_offset) = tlv::decode_header(packet, offset).ok()?;
        let len = len as usize;
        let value_end = value_offset.checked_add(len)?;
        if value_end > packet_end {
            return None;
        }
        if ty == NDN_TYPE_NONCE {
            if len == 4 {
                let bytes = packet.get(value_offset..value_end)?;
                return Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]));
            }
            return None;
        }
        if ty != NDN_TYPE_INTEREST_LIFETIME {
            // Only Nonce and InterestLifetime are expected directly after
            // the Name in a well-formed Interest's selector-free prefix;
            // anything else means the nonce isn't where we expect it.
            return None;
        }
        offset = value_end;
    }
    None
}

/// Extracts the real Nonce TLV if present; otherwise falls back to the low
/// 32 bits of the name hash, kept
/// as a last resort, never as the primary path.
pub fn extract_nonce_or_pseudo(packet: &[u8], offset: usize, packet_end: usize, name_hash: u64) -> u32 {
    extract_real_nonce(packet, offset, packet_end).unwrap_or(name_hash as u32)
}

pub fn probabilistic_fallback(threshold_pct: u8) -> bool {
    use rand::Rng;
    if threshold_pct == 0 {
        return false;
    }
    let roll: u8 = rand::rng().random_range(0..100);
    roll < threshold_pct
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonceSource {
    Real,
    Pseudo,
}

pub fn nonce_with_source(
    packet: &[u8],
    offset: usize,
    packet_end: usize,
    name_hash: u64,
) -> (u32, NonceSource) {
    match extract_real_nonce(packet, offset, packet_end) {
        Some(n) => (n, NonceSource::Real),
        None => (name_hash as u32, NonceSource::Pseudo),
    }
}

pub type InterestError = NdnError;
