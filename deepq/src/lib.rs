//! Deep Q-network training and evaluation.
//!
//! The workspace consists of the following crates:
//!
//! * `deepq-core` defines the traits of the collaborators of a run (environment,
//!   agent, optimizer, replay buffer, checkpoint and progress sinks), the
//!   exploration schedule and the training and evaluation loops.
//! * `deepq-candle-agent` implements the agent, the temporal-difference loss
//!   and the optimizer with [candle](https://crates.io/crates/candle-core).
//! * `deepq-tensorboard` writes progress records as TensorBoard event files.
//! * `deepq` (this crate) wires them together on [`Corridor`](corridor::Corridor),
//!   a small environment for smoke runs, and provides the `deepq` command.
pub mod config;
pub mod corridor;
pub mod run;
pub use config::RunConfig;
