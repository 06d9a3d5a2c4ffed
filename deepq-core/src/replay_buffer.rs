//! A generic implementation of replay buffer.
mod base;
mod batch;
mod config;
pub use base::SimpleReplayBuffer;
pub use batch::StdBatch;
pub use config::SimpleReplayBufferConfig;
