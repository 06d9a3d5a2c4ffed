//! Optimizer.
use anyhow::Result;

/// A scalar loss that can be read back after an optimization step.
pub trait LossValue {
    /// Returns the value of the loss.
    fn value(&self) -> Result<f32>;
}

/// Applies gradient updates to the parameters of an agent.
pub trait Optimizer {
    /// The loss this optimizer minimizes.
    type Loss;

    /// Clears gradients, back-propagates `loss` and applies one update.
    ///
    /// Gradients never accumulate across calls.
    fn backward_step(&mut self, loss: &Self::Loss) -> Result<()>;
}
