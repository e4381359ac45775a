//! Deterministic RNG helpers.
//!
//! Same `(base_seed, scenario_seed, month, label, key)` always yields the
//! same ChaCha stream across platforms and runs. Seeds are derived with
//! FNV-1a rather than the process hasher, which is not stable across runs.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(hash: u64, bytes: &[u8]) -> u64 {
    let mut h = hash;
    for &b in bytes {
        h ^= u64::from(b);
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}

/// Stable 64-bit seed derived from the campaign seeds plus a call site label
/// and key (e.g. `("choice", month, "A")`).
pub fn stable_seed(
    base_seed: u64,
    scenario_seed: u64,
    month: u32,
    label: &str,
    key: &str,
) -> u64 {
    let mut h = fnv1a(FNV_OFFSET, b"startup-survivor");
    h = fnv1a(h, &base_seed.to_le_bytes());
    h = fnv1a(h, &scenario_seed.to_le_bytes());
    h = fnv1a(h, &month.to_le_bytes());
    h = fnv1a(h, label.as_bytes());
    h = fnv1a(h, b"|");
    h = fnv1a(h, key.as_bytes());
    h
}

/// ChaCha8 stream for a given call site.
pub fn rng_from(base_seed: u64, scenario_seed: u64, month: u32, label: &str, key: &str) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(stable_seed(base_seed, scenario_seed, month, label, key))
}
