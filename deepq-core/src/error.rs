//! Errors in the library.
use std::path::PathBuf;
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug)]
pub enum DqnError {
    /// A hyperparameter is missing or out of its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A batch was requested from a replay buffer holding no transitions.
    #[error("Cannot sample a batch from an empty replay buffer")]
    EmptyReplayBuffer,

    /// A checkpoint with the same tag has already been written.
    #[error("Checkpoint already exists: {0:?}")]
    CheckpointExists(PathBuf),

    /// The collaborator does not support the requested capability.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}
