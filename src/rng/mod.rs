//! Injected randomness
//!
//! The balance core never owns randomness. Callers hand in a
//! [`RandomSource`] (or a bare uniform value) and every roll consumes exactly
//! one draw, so a replay that feeds the same stream in the same order
//! reproduces every outcome.
//!
//! Two sources ship with the crate:
//! - [`SeededRandom`]: xoshiro256** seeded from a run seed, optionally split
//!   into labeled sub-streams via SHA3
//! - [`UniformStream`]: a recorded list of uniform values (replays, tests)

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use sha3::{Digest, Sha3_256};

/// Deterministic source of randomness supplied by the caller
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`
    fn next_uniform(&mut self) -> f64;

    /// Next integer in `[lo, hi]`; `lo` when the range is empty
    fn next_int(&mut self, lo: i64, hi: i64) -> i64;
}

/// Derive an independent seed for a named stream (e.g. `"drops"`, wave 12).
pub fn derive_seed(seed: u64, label: &str, index: u64) -> u64 {
    let mut hasher = Sha3_256::new();
    hasher.update(seed.to_le_bytes());
    hasher.update(label.as_bytes());
    hasher.update(index.to_le_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

/// Seeded xoshiro256** generator that counts its draws
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: Xoshiro256StarStar,
    draws: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            draws: 0,
        }
    }

    /// Generator for a labeled sub-stream of a run seed
    pub fn for_stream(seed: u64, label: &str, index: u64) -> Self {
        Self::new(derive_seed(seed, label, index))
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl RandomSource for SeededRandom {
    fn next_uniform(&mut self) -> f64 {
        self.draws += 1;
        self.rng.gen::<f64>()
    }

    fn next_int(&mut self, lo: i64, hi: i64) -> i64 {
        self.draws += 1;
        if lo >= hi {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }
}

/// Replays a recorded list of uniform values, then yields 0.0 forever
#[derive(Debug, Clone, Default)]
pub struct UniformStream {
    values: Vec<f64>,
    cursor: usize,
}

impl UniformStream {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Values consumed so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.values.len().saturating_sub(self.cursor)
    }
}

impl RandomSource for UniformStream {
    fn next_uniform(&mut self) -> f64 {
        let value = self.values.get(self.cursor).copied().unwrap_or(0.0);
        self.cursor += 1;
        value
    }

    fn next_int(&mut self, lo: i64, hi: i64) -> i64 {
        let u = self.next_uniform();
        if lo >= hi {
            return lo;
        }
        let span = hi as f64 - lo as f64 + 1.0;
        let offset = (u.clamp(0.0, 1.0) * span).floor() as i64;
        lo.saturating_add(offset).min(hi)
    }
}
