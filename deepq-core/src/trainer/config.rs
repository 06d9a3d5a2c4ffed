//! Configuration of [`Trainer`](super::Trainer).
use crate::{error::DqnError, EpsilonSchedule};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Trainer`](super::Trainer).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TrainerConfig {
    /// Exploration probability at the first step.
    pub eps_start: f64,

    /// Asymptotic exploration probability.
    pub eps_end: f64,

    /// Decay constant of the exploration probability in environment steps.
    pub eps_decay: f64,

    /// Discount factor.
    pub gamma: f64,

    /// Number of transitions in a batch.
    pub batch_size: usize,

    /// Optimization starts once the replay buffer holds more transitions than this.
    pub initial_memory: usize,

    /// Interval of progress reports in environment steps.
    pub progress_interval: usize,

    /// Interval of checkpoints in completed episodes.
    pub checkpoint_interval: usize,

    /// An extra checkpoint is written after this number of completed episodes.
    pub first_checkpoint_episode: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            eps_start: 1.0,
            eps_end: 0.01,
            eps_decay: 30000.0,
            gamma: 0.99,
            batch_size: 32,
            initial_memory: 10000,
            progress_interval: 10000,
            checkpoint_interval: 100,
            first_checkpoint_episode: 10,
        }
    }
}

impl TrainerConfig {
    /// Sets the exploration probabilities and their decay constant.
    pub fn epsilon(mut self, eps_start: f64, eps_end: f64, eps_decay: f64) -> Self {
        self.eps_start = eps_start;
        self.eps_end = eps_end;
        self.eps_decay = eps_decay;
        self
    }

    /// Sets the discount factor.
    pub fn gamma(mut self, v: f64) -> Self {
        self.gamma = v;
        self
    }

    /// Sets the batch size.
    pub fn batch_size(mut self, v: usize) -> Self {
        self.batch_size = v;
        self
    }

    /// Sets the warm-up threshold of the replay buffer.
    pub fn initial_memory(mut self, v: usize) -> Self {
        self.initial_memory = v;
        self
    }

    /// Sets the interval of progress reports in environment steps.
    pub fn progress_interval(mut self, v: usize) -> Self {
        self.progress_interval = v;
        self
    }

    /// Sets the interval of checkpoints in completed episodes.
    pub fn checkpoint_interval(mut self, v: usize) -> Self {
        self.checkpoint_interval = v;
        self
    }

    /// Sets the episode count of the extra early checkpoint.
    pub fn first_checkpoint_episode(mut self, v: usize) -> Self {
        self.first_checkpoint_episode = v;
        self
    }

    /// Returns the exploration schedule.
    pub fn schedule(&self) -> EpsilonSchedule {
        EpsilonSchedule::new(self.eps_start, self.eps_end, self.eps_decay)
    }

    /// Checks hyperparameters that do not depend on other collaborators.
    pub fn validate(&self) -> Result<()> {
        self.schedule().validate()?;
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(DqnError::InvalidConfig(format!(
                "gamma must be in [0, 1], got {}",
                self.gamma
            ))
            .into());
        }
        if self.batch_size == 0 {
            return Err(DqnError::InvalidConfig("batch_size must be positive".to_string()).into());
        }
        Ok(())
    }

    /// Constructs [`TrainerConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TrainerConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
