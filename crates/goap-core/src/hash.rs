//! Stable string hashing for ids.
//!
//! Action ids, ability names and world-state variables are authored as strings
//! but compared as integers. The hash must be identical across runs and
//! platforms, so this is FNV-1a rather than `std`'s randomized hasher.

const FNV_OFFSET: u64 = 0xCBF2_9CE4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01B3;

pub const fn stable_hash(s: &str) -> u64 {
    let bytes = s.as_bytes();
    let mut hash = FNV_OFFSET;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    // 0 is the "unset" sentinel for every id built on this hash.
    if hash == 0 {
        FNV_OFFSET
    } else {
        hash
    }
}
