//! Collaborator contracts consumed by the training and evaluation loops.
mod agent;
mod batch;
mod env;
mod optimizer;
mod policy;
mod replay_buffer;
mod step;
pub use agent::{Agent, SaveParams};
pub use batch::TransitionBatch;
pub use env::{Env, ScopedEnv};
pub use optimizer::{LossValue, Optimizer};
pub use policy::Policy;
pub use replay_buffer::{ExperienceBufferBase, ReplayBufferBase};
use std::fmt::Debug;
pub use step::{Info, Step, Transition};

/// An observation of an environment.
///
/// Observations are opaque to the control loops; only the agent
/// knows how to turn them into network inputs.
pub trait Obs: Clone + Debug {}

/// An action of an environment.
pub trait Act: Clone + Debug {}
