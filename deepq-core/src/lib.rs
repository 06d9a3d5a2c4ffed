#![warn(missing_docs)]
//! Core of deep Q-network training.
//!
//! This crate defines the contracts of the collaborators of a DQN run
//! ([`Env`], [`Agent`], [`Optimizer`], replay buffers, [`Checkpointer`] and
//! [`Recorder`](record::Recorder)) and the loops driving them:
//!
//! * [`EpsilonSchedule`] maps the number of environment steps to an
//!   exploration probability.
//! * [`Trainer`] collects transitions, gates optimization on replay buffer
//!   warm-up, writes checkpoints and reports progress.
//! * [`DefaultEvaluator`] runs greedy episodes for measurement.
pub mod checkpoint;
#[cfg(test)]
pub(crate) mod dummy;
pub mod error;
pub mod record;
pub mod replay_buffer;

mod base;
pub use base::{
    Act, Agent, Env, ExperienceBufferBase, Info, LossValue, Obs, Optimizer, Policy,
    ReplayBufferBase, SaveParams, ScopedEnv, Step, Transition, TransitionBatch,
};
pub use checkpoint::{CheckpointTag, Checkpointer, DirCheckpointer, NullCheckpointer};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator, EvaluatorConfig};

mod schedule;
pub use schedule::EpsilonSchedule;

mod trainer;
pub use trainer::{Trainer, TrainerConfig, TrainingState};
