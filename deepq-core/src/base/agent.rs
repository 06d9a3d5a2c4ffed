//! Agent.
use super::{optimizer::LossValue, Env, Policy};
use anyhow::Result;
use std::path::Path;

/// A serializable snapshot of model parameters.
pub trait SaveParams {
    /// Saves the parameters to `path`.
    fn save_params(&self, path: &Path) -> Result<()>;

    /// Loads the parameters from `path`.
    fn load_params(&mut self, path: &Path) -> Result<()>;
}

/// Represents a trainable action-value approximator on an environment.
///
/// The agent does not own an optimizer: [`Agent::td_loss`] only builds the
/// loss, and an [`Optimizer`](super::Optimizer) applies it.
pub trait Agent<E: Env>: Policy<E> + SaveParams {
    /// A batch of transitions consumed by [`Agent::td_loss`].
    type Batch;

    /// The differentiable loss produced by [`Agent::td_loss`].
    type Loss: LossValue;

    /// Set the agent to training mode.
    fn train(&mut self);

    /// Set the agent to evaluation (inference) mode.
    fn eval(&mut self);

    /// Return if it is in training mode.
    fn is_train(&self) -> bool;

    /// Builds the one-step temporal-difference loss on `batch`.
    ///
    /// The bootstrap target must not carry gradients; only the
    /// action-values of the taken actions are differentiable.
    fn td_loss(&self, batch: Self::Batch, discount_factor: f64) -> Result<Self::Loss>;
}
