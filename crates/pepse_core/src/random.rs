//! Stateless seeded draws.
//!
//! Every placement decision is a pure function of `(key, seed)`: the pair is
//! hashed with xxh3 and the hash seeds a fresh `ChaCha8Rng` for exactly one
//! draw. Nothing is carried between calls, so columns can be generated in any
//! order and re-generated later with identical results.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use xxhash_rust::xxh3::xxh3_64;

/// Mix `key` and `seed` into one well-distributed 64-bit value.
pub fn mix(key: i64, seed: i64) -> u64 {
    let mut bytes = [0u8; 16];
    bytes[..8].copy_from_slice(&key.to_le_bytes());
    bytes[8..].copy_from_slice(&seed.to_le_bytes());
    xxh3_64(&bytes)
}

/// Draw one integer in `[0, bound)` from the stream keyed by `(key, seed)`.
pub fn pseudo_random(key: i64, seed: i64, bound: u32) -> u32 {
    debug_assert!(bound > 0, "pseudo_random bound must be > 0");
    let mut rng = ChaCha8Rng::seed_from_u64(mix(key, seed));
    rng.gen_range(0..bound)
}
