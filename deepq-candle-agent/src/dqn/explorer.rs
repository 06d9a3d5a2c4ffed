//! Epsilon-greedy exploration.
use anyhow::Result;
use candle_core::{shape::D, DType, Tensor};
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Decides between random and greedy actions.
///
/// The exploration probability is supplied per call by the caller; the
/// explorer holds no schedule of its own.
pub struct EpsilonGreedy {
    rng: SmallRng,
}

impl EpsilonGreedy {
    /// Constructs the explorer with a seeded random number generator.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Returns `true` with probability `epsilon`.
    ///
    /// Never returns `true` for `epsilon == 0.0`.
    pub fn explore(&mut self, epsilon: f64) -> bool {
        self.rng.gen::<f64>() < epsilon
    }

    /// A uniformly random action in `0..n_actions`.
    pub fn random_action(&mut self, n_actions: usize) -> i64 {
        self.rng.gen_range(0..n_actions) as i64
    }
}

/// Index of the largest action-value in `q`, a tensor of shape `[1, n_actions]`.
pub fn greedy_action(q: &Tensor) -> Result<i64> {
    let a = q.argmax(D::Minus1)?.squeeze(0)?.to_dtype(DType::I64)?;
    Ok(a.to_scalar::<i64>()?)
}
