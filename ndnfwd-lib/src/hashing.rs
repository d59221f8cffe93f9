//! 64-bit name fingerprinting.
//!
//! All four algorithms cap iteration at a configurable number of bytes
//! (see `Config::hash_cap_bytes`) so that worst-case latency is constant
//! regardless of name length; a name longer than the cap is hashed over
//! its leading bytes only. These are fingerprints for map-key purposes,
//! not cryptographic digests: callers must not rely on collision
//! resistance.

use serde::Deserialize;

/// Default value of `Config::hash_cap_bytes`.
pub const DEFAULT_HASH_CAP_BYTES: usize = 64;

/// Selects which of the four fast-path hash functions [`hash_name`] uses.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    Simple = 0,
    #[default]
    Jenkins = 1,
    Murmur = 2,
    XxHashLike = 3,
}

impl HashAlgorithm {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Simple),
            1 => Some(Self::Jenkins),
            2 => Some(Self::Murmur),
            3 => Some(Self::XxHashLike),
            _ => None,
        }
    }
}

/// Hashes `bytes` (truncated to `cap_bytes`) with the selected algorithm.
/// A zero-length input hashes to a well-defined constant for every
/// algorithm (each algorithm's identity/seed value).
pub fn hash_name(bytes: &[u8], algo: HashAlgorithm, cap_bytes: usize) -> u64 {
    let bytes = if bytes.len() > cap_bytes {
        &bytes[..cap_bytes]
    } else {
        bytes
    };
    match algo {
        HashAlgorithm::Simple => simple_hash(bytes),
        HashAlgorithm::Jenkins => jenkins_hash(bytes),
        HashAlgorithm::Murmur => murmur_hash(bytes),
        HashAlgorithm::XxHashLike => xxhash_like(bytes),
    }
}

/// Rolling `h = ((h << 5) + h) ^ b`, the source's default-case hash.
fn simple_hash(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0;
    for &b in bytes {
        hash = hash.wrapping_shl(5).wrapping_add(hash) ^ (b as u64);
    }
    hash
}

/// Jenkins one-at-a-time, the source's kernel-side default algorithm.
fn jenkins_hash(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0;
    for &b in bytes {
        hash = hash.wrapping_add(b as u64);
        hash = hash.wrapping_add(hash.wrapping_shl(10));
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash.wrapping_shl(3));
    hash ^= hash >> 11;
    hash = hash.wrapping_add(hash.wrapping_shl(15));
    hash
}

/// Murmur-like 64-bit mix. Reuses `0x5bd1e995` as both seed and multiplier,
/// matching the source's simplified (non-MurmurHash3) construction.
fn murmur_hash(bytes: &[u8]) -> u64 {
    const M: u64 = 0x5bd1e995;
    let seed: u64 = M ^ (bytes.len() as u64);
    let mut hash: u64 = seed;

    let mut chunks = bytes.chunks_exact(8);
    for chunk in &mut chunks {
        let mut k = u64::from_le_bytes(chunk.try_into().expect("chunk is exactly 8 bytes"));
        k = k.wrapping_mul(M);
        k ^= k >> 24;
        k = k.wrapping_mul(M);
        hash = hash.wrapping_mul(M);
        hash ^= k;
    }

    let remainder = chunks.remainder();
    if let Some(&first) = remainder.first() {
        hash ^= first as u64;
        hash = hash.wrapping_mul(M);
    }

    hash ^= hash >> 13;
    hash = hash.wrapping_mul(M);
    hash ^= hash >> 15;
    hash
}

/// Single-accumulator block hash, not real xxHash64: the source notes the
/// BPF verifier's loop-count limits forced a "simplified approach for eBPF
/// compatibility" with one `h64` accumulator and no multi-lane mixing. Kept
/// bit-for-bit compatible with that construction rather than upgraded to a
/// conforming xxHash64, since two routers must agree on the same bits to
/// agree on a name's identity.
fn xxhash_like(bytes: &[u8]) -> u64 {
    const PRIME64_1: u64 = 0x9E3779B185EBCA87;
    const PRIME64_2: u64 = 0xC2B2AE3D27D4EB4F;
    const PRIME64_3: u64 = 0x165667B19E3779F9;
    const PRIME64_4: u64 = 0x85EBCA77C2B2AE63;
    const PRIME64_5: u64 = 0x27D4EB2F165667C5;

    let len = bytes.len() as u64;
    let mut hash: u64 = PRIME64_5;

    if bytes.len() >= 32 {
        // The kernel side unrolls at most 8 blocks (64 bytes); callers cap
        // the name at that length before reaching this function anyway.
        for chunk in bytes.chunks_exact(8).take(8) {
            let k1 = u64::from_le_bytes(chunk.try_into().expect("8 bytes"));
            hash ^= k1.wrapping_mul(PRIME64_2);
            hash = hash.rotate_left(31).wrapping_mul(PRIME64_1);
            hash = hash.wrapping_mul(PRIME64_1).wrapping_add(PRIME64_4);
        }
        hash = hash.wrapping_add(len);
    } else if bytes.len() >= 16 {
        let mut chunks = bytes.chunks_exact(8);
        let a = u64::from_le_bytes(chunks.next().expect("8 bytes").try_into().expect("8 bytes"));
        hash ^= a.wrapping_mul(PRIME64_2);
        hash = hash.rotate_left(31).wrapping_mul(PRIME64_1);
        let b = u64::from_le_bytes(chunks.next().expect("8 bytes").try_into().expect("8 bytes"));
        hash ^= b.wrapping_mul(PRIME64_2);
        hash = hash.rotate_left(31).wrapping_mul(PRIME64_1);
        hash = hash.wrapping_add(len);
    } else if bytes.len() >= 8 {
        let a = u64::from_le_bytes(bytes[..8].try_into().expect("8 bytes"));
        hash ^= a.wrapping_mul(PRIME64_2);
        hash = hash.rotate_left(31).wrapping_mul(PRIME64_1);
        hash = hash.wrapping_add(len);
    } else {
        for &b in bytes.iter().take(8) {
            hash ^= (b as u64).wrapping_mul(PRIME64_5);
            hash = hash.rotate_left(11).wrapping_mul(PRIME64_1);
        }
        hash = hash.wrapping_add(len);
    }

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(PRIME64_2);
    hash ^= hash >> 29;
    hash = hash.wrapping_mul(PRIME64_3);
    hash ^= hash >> 32;
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_well_defined_for_every_algorithm() {
        for algo in [
            HashAlgorithm::Simple,
            HashAlgorithm::Jenkins,
            HashAlgorithm::Murmur,
            HashAlgorithm::XxHashLike,
        ] {
            // must not panic, and must be deterministic
            let a = hash_name(&[], algo, DEFAULT_HASH_CAP_BYTES);
            let b = hash_name(&[], algo, DEFAULT_HASH_CAP_BYTES);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn names_longer_than_cap_truncate_identically() {
        let mut long = vec![0x41u8; 200];
        for (i, b) in long.iter_mut().enumerate() {
            *b = (i % 251) as u8;
        }
        let capped = &long[..DEFAULT_HASH_CAP_BYTES];
        for algo in [
            HashAlgorithm::Simple,
            HashAlgorithm::Jenkins,
            HashAlgorithm::Murmur,
            HashAlgorithm::XxHashLike,
        ] {
            assert_eq!(
                hash_name(&long, algo, DEFAULT_HASH_CAP_BYTES),
                hash_name(capped, algo, DEFAULT_HASH_CAP_BYTES)
            );
        }
    }

    #[test]
    fn smaller_cap_changes_the_hash() {
        let name = b"foo/bar/baz";
        let full = hash_name(name, HashAlgorithm::Jenkins, DEFAULT_HASH_CAP_BYTES);
        let truncated = hash_name(name, HashAlgorithm::Jenkins, 4);
        assert_ne!(full, truncated);
    }

    #[test]
    fn jenkins_is_deterministic_and_distinguishes_inputs() {
        let a = hash_name(b"foo/ba", HashAlgorithm::Jenkins, DEFAULT_HASH_CAP_BYTES);
        let b = hash_name(b"foo/bb", HashAlgorithm::Jenkins, DEFAULT_HASH_CAP_BYTES);
        assert_ne!(a, b);
        assert_eq!(a, hash_name(b"foo/ba", HashAlgorithm::Jenkins, DEFAULT_HASH_CAP_BYTES));
    }

    #[test]
    fn algorithm_from_id_rejects_unknown() {
        assert_eq!(HashAlgorithm::from_id(1), Some(HashAlgorithm::Jenkins));
        assert_eq!(HashAlgorithm::from_id(9), None);
    }
}
