//! Deterministic random number generation.
//!
//! RULE: Nothing in the casino may call a platform RNG directly.
//! The engine draws from exactly one RandomSource, injected at
//! construction. Replaying a run means replaying the same sequence
//! of draws: for a given seed and step count, every event body makes
//! the same (choice, randint, random) calls in the same order.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::collections::VecDeque;

/// The single sequential stream of randomness a casino consumes.
pub trait RandomSource: Send {
    /// A float in [0.0, 1.0).
    fn random(&mut self) -> f64;

    /// An integer in [low, high], both inclusive.
    /// Returns `low` when the range is empty.
    fn randint(&mut self, low: i64, high: i64) -> i64;

    /// A uniform index into a sequence of `len` items. `len == 0` yields 0.
    fn choose_index(&mut self, len: usize) -> usize;

    /// Two distinct indices into a sequence of `len >= 2` items.
    fn sample_pair(&mut self, len: usize) -> (usize, usize);

    /// Weighted choice over `weights`. Consumes exactly one `random()`
    /// draw and bisects the cumulative weight table.
    fn weighted_index(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        let target = self.random() * total;
        let mut cumulative = 0.0;
        for (i, weight) in weights.iter().enumerate() {
            cumulative += weight;
            if target < cumulative {
                return i;
            }
        }
        // Float rounding can leave target == total; land on the last live weight.
        weights.iter().rposition(|w| *w > 0.0).unwrap_or(0)
    }
}

/// Seeded PCG stream. Two casinos built from the same seed and driven
/// through the same calls produce byte-identical histories.
pub struct CasinoRng {
    seed: u64,
    inner: Pcg64Mcg,
}

impl CasinoRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Draw a fresh seed from the thread RNG. The seed is logged and
    /// kept, so an unseeded run can still be replayed afterwards.
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::thread_rng().gen();
        log::info!("no seed supplied, drew seed={seed}");
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for CasinoRng {
    fn random(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn randint(&mut self, low: i64, high: i64) -> i64 {
        if high < low {
            return low;
        }
        self.inner.gen_range(low..=high)
    }

    fn choose_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.inner.gen_range(0..len)
    }

    fn sample_pair(&mut self, len: usize) -> (usize, usize) {
        assert!(len >= 2, "sample_pair needs at least two items");
        let picked = rand::seq::index::sample(&mut self.inner, len, 2);
        (picked.index(0), picked.index(1))
    }
}

/// A fixed random source that replays queued draws.
///
/// Floats feed `random()`, integers feed `randint()` (clamped into the
/// requested range), indices feed `choose_index()`, `sample_pair()` and
/// `weighted_index()`. An exhausted queue falls back to the lowest value.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    floats: VecDeque<f64>,
    ints: VecDeque<i64>,
    indices: VecDeque<usize>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_floats(mut self, floats: impl IntoIterator<Item = f64>) -> Self {
        self.floats.extend(floats);
        self
    }

    pub fn with_ints(mut self, ints: impl IntoIterator<Item = i64>) -> Self {
        self.ints.extend(ints);
        self
    }

    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(indices);
        self
    }

    /// Total number of draws still queued.
    pub fn remaining(&self) -> usize {
        self.floats.len() + self.ints.len() + self.indices.len()
    }

    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.indices.pop_front().unwrap_or(0).min(len - 1)
    }
}

impl RandomSource for ScriptedRng {
    fn random(&mut self) -> f64 {
        self.floats.pop_front().unwrap_or(0.0)
    }

    fn randint(&mut self, low: i64, high: i64) -> i64 {
        let high = high.max(low);
        self.ints.pop_front().map_or(low, |v| v.clamp(low, high))
    }

    fn choose_index(&mut self, len: usize) -> usize {
        self.next_index(len)
    }

    fn sample_pair(&mut self, len: usize) -> (usize, usize) {
        assert!(len >= 2, "sample_pair needs at least two items");
        let first = self.next_index(len);
        let mut second = self.next_index(len);
        if second == first {
            second = (first + 1) % len;
        }
        (first, second)
    }

    fn weighted_index(&mut self, weights: &[f64]) -> usize {
        self.next_index(weights.len())
    }
}
