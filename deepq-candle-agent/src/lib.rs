//! DQN approximator implemented with [candle](https://crates.io/crates/candle-core).
//!
//! [`Dqn`](dqn::Dqn) implements the [`Agent`](deepq_core::Agent) contract of
//! `deepq-core`: epsilon-greedy action selection and the one-step
//! temporal-difference loss of [`td_loss`]. Parameters are updated by an
//! [`Optimizer`](opt::Optimizer) built from the variables of the agent.
pub mod dqn;
pub mod mlp;
pub mod model;
pub mod opt;
pub mod td_loss;
pub mod util;
use anyhow::Result;
use serde::{Deserialize, Serialize};
pub use td_loss::TdLoss;

#[derive(Clone, Debug, Copy, Default, Deserialize, Serialize, PartialEq)]
/// Device for using candle.
///
/// This enum is added because [`candle_core::Device`] does not support serialization.
pub enum Device {
    /// The main CPU device.
    #[default]
    Cpu,

    /// The main GPU device.
    Cuda(usize),
}

impl Device {
    /// Returns the corresponding [`candle_core::Device`].
    ///
    /// Fails if a CUDA device is requested and unavailable.
    pub fn to_candle(self) -> Result<candle_core::Device> {
        match self {
            Self::Cpu => Ok(candle_core::Device::Cpu),
            Self::Cuda(n) => Ok(candle_core::Device::new_cuda(n)?),
        }
    }
}
