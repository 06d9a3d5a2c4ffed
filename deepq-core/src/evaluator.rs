//! Evaluate [`Agent`].
use crate::{Agent, Env};
use anyhow::Result;
mod default_evaluator;
pub use default_evaluator::{DefaultEvaluator, EvaluatorConfig};

/// Evaluate [`Agent`].
pub trait Evaluator<E: Env, A: Agent<E>> {
    /// Runs greedy episodes on `env` and returns the total reward of each episode.
    ///
    /// The environment is consumed and closed before returning.
    fn evaluate(&mut self, env: E, agent: &mut A, n_episodes: usize) -> Result<Vec<f32>>;
}
