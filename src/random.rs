//! Injectable randomness for the interpreter.
//!
//! Every run draws from its own [`RandomSource`], so seeded runs are
//! reproducible and concurrent runs never share generator state.

use rand::Rng;
use std::collections::VecDeque;

/// The two kinds of draw the interpreter makes.
pub trait RandomSource {
    /// Uniform integer in `[0, bound)`. `bound` is always at least 1.
    fn below(&mut self, bound: u32) -> u32;

    /// Uniform float in `[lo, hi]`.
    fn uniform(&mut self, lo: f32, hi: f32) -> f32;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn below(&mut self, bound: u32) -> u32 {
        (**self).below(bound)
    }

    fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        (**self).uniform(lo, hi)
    }
}

/// Adapts any [`rand::Rng`] into a [`RandomSource`].
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use symbios_tree::{RandomSource, RngSource};
///
/// let mut rng = RngSource::new(StdRng::seed_from_u64(7));
/// assert!(rng.below(3) < 3);
/// ```
#[derive(Clone, Debug)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn below(&mut self, bound: u32) -> u32 {
        self.rng.random_range(0..bound.max(1))
    }

    /// Returns `lo` when the range is empty or not finite.
    fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        if !(hi - lo).is_finite() || hi <= lo {
            return lo;
        }
        self.rng.random_range(lo..=hi)
    }
}

/// Replays fixed draws, for tests and for hosts that want fully scripted output.
///
/// Integer draws come from `levels` (reduced modulo the bound); float draws come
/// from `fractions`, each a position in `[0, 1]` inside the requested range.
/// An exhausted queue yields `0` and the lower bound respectively.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    levels: VecDeque<u32>,
    fractions: VecDeque<f32>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_levels(mut self, levels: impl IntoIterator<Item = u32>) -> Self {
        self.levels.extend(levels);
        self
    }

    pub fn with_fractions(mut self, fractions: impl IntoIterator<Item = f32>) -> Self {
        self.fractions.extend(fractions);
        self
    }

    /// Number of integer draws still queued.
    pub fn pending_levels(&self) -> usize {
        self.levels.len()
    }
}

impl RandomSource for ScriptedSource {
    fn below(&mut self, bound: u32) -> u32 {
        self.levels.pop_front().unwrap_or(0) % bound.max(1)
    }

    fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        let t = self.fractions.pop_front().unwrap_or(0.0).clamp(0.0, 1.0);
        lo + (hi - lo) * t
    }
}
