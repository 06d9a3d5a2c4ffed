//! Policy.
use super::Env;
use anyhow::Result;

/// An exploration policy on an environment.
pub trait Policy<E: Env> {
    /// Selects an action for `obs`.
    ///
    /// With probability `epsilon` a uniformly random action is taken,
    /// otherwise the greedy action. `epsilon == 0.0` is the pure greedy policy.
    fn act(&mut self, obs: &E::Obs, epsilon: f64) -> Result<E::Act>;
}
