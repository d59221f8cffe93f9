//! Name TLV location and hashing — the bridge between the TLV codec and
//! the name hasher that the pipeline's Interest/Data handlers share.

use crate::error::NdnError;
use crate::hashing::{hash_name, HashAlgorithm};
use crate::tlv;

use super::demux::NDN_TYPE_NAME;

/// Locates the top-level Name TLV starting at `offset` (immediately after
/// the outer Interest/Data/NACK TLV header) and returns its name hash plus
/// the offset of the first byte after the Name TLV, for callers that need
/// to keep walking (e.g. `find_content_tlv`).
///
/// The hash is computed over the *raw* Name TLV value bytes — the
/// concatenation of its NameComponent TLVs — not a hash of the parsed
/// hierarchical components.
pub fn locate_and_hash_name(
    packet: &[u8],
    offset: usize,
    algo: HashAlgorithm,
    hash_cap_bytes: usize,
) -> Result<(u64, usize), NdnError> {
    let (ty, len, value_offset) = tlv::decode_header(packet, offset)?;
    if ty != NDN_TYPE_NAME {
        return Err(NdnError::MalformedNdn);
    }
    let len = len as usize;
    let end = value_offset.checked_add(len).ok_or(NdnError::MalformedNdn)?;
    let name_bytes = packet.get(value_offset..end).ok_or(NdnError::MalformedNdn)?;

    let hash = hash_name(name_bytes, algo, hash_cap_bytes);
    Ok((hash, end))
}
