//! Configuration of a training and evaluation run.
use crate::corridor::{Corridor, CorridorConfig};
use anyhow::{anyhow, Result};
use deepq_candle_agent::{
    dqn::{DqnConfig, DqnModelConfig},
    mlp::MlpConfig,
    opt::OptimizerConfig,
    util::OutDim,
};
use deepq_core::{replay_buffer::SimpleReplayBufferConfig, EvaluatorConfig, TrainerConfig};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// All configurations of a run, saved as a single YAML file.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct RunConfig {
    /// Environment.
    pub env: CorridorConfig,

    /// Training loop.
    pub trainer: TrainerConfig,

    /// Agent.
    pub agent: DqnConfig<MlpConfig>,

    /// Optimizer of the action-value network.
    pub opt: OptimizerConfig,

    /// Replay buffer.
    pub replay_buffer: SimpleReplayBufferConfig,

    /// Evaluation loop.
    pub evaluator: EvaluatorConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        let env = CorridorConfig::default();
        let mlp_config = MlpConfig::new(env.length, vec![64, 64], Corridor::N_ACTIONS, false);

        Self {
            trainer: TrainerConfig::default()
                .epsilon(1.0, 0.01, 2000.0)
                .initial_memory(500)
                .progress_interval(1000),
            agent: DqnConfig::default()
                .model_config(DqnModelConfig::default().q_config(mlp_config)),
            opt: OptimizerConfig::Adam { lr: 1e-3 },
            replay_buffer: SimpleReplayBufferConfig::default(),
            evaluator: EvaluatorConfig::default(),
            env,
        }
    }
}

impl RunConfig {
    /// Checks that the network matches the environment.
    pub fn validate(&self) -> Result<()> {
        let q_config = self
            .agent
            .get_q_config()
            .ok_or_else(|| anyhow!("agent.model_config.q_config is not set"))?;
        if q_config.in_dim() != self.env.length {
            return Err(anyhow!(
                "Input dimension {} does not match the corridor length {}",
                q_config.in_dim(),
                self.env.length
            ));
        }
        if q_config.get_out_dim() != Corridor::N_ACTIONS {
            return Err(anyhow!(
                "Output dimension {} does not match the number of actions {}",
                q_config.get_out_dim(),
                Corridor::N_ACTIONS
            ));
        }
        self.trainer.validate()
    }

    /// Constructs [`RunConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`RunConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
