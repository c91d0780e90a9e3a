//! Seed sourcing: runtime entropy when the caller gives none, and derived sub-seeds.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::rng::mix64;

const VARIANT_STREAM_TAG: &[u8] = b"levelgen/terrain-variants";

static RUNTIME_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Non-reproducible seed from wall-clock time, process id and a process-wide counter.
pub fn runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = RUNTIME_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix64(entropy)
}

/// Seed for the terrain-variant noise; independent of the layout stream for the same seed.
pub(super) fn variant_seed(seed: u64) -> u64 {
    xxh3_64_with_seed(VARIANT_STREAM_TAG, seed)
}
