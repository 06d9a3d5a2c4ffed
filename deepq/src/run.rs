//! Training and evaluation of a candle DQN agent on [`Corridor`].
use crate::{
    corridor::{Corridor, CorridorAct, CorridorObs},
    RunConfig,
};
use anyhow::{anyhow, Result};
use deepq_candle_agent::{dqn::Dqn, mlp::Mlp};
use deepq_core::{
    record::Recorder,
    replay_buffer::SimpleReplayBuffer,
    DefaultEvaluator, DirCheckpointer, Env, Evaluator, ReplayBufferBase, SaveParams, Trainer,
    TrainingState,
};
use log::info;
use std::path::Path;

/// Agent trained on [`Corridor`].
pub type Agent = Dqn<Corridor, Mlp>;

type ReplayBuffer = SimpleReplayBuffer<CorridorObs, CorridorAct>;

/// Trains a fresh agent for `n_episodes` episodes.
///
/// Checkpoints are written into `model_dir`, and the run configuration is
/// saved next to them as `run.yaml`.
pub fn train(
    config: &RunConfig,
    model_dir: &Path,
    n_episodes: usize,
    recorder: &mut dyn Recorder,
) -> Result<(Agent, TrainingState)> {
    config.validate()?;
    std::fs::create_dir_all(model_dir)?;
    config.save(model_dir.join("run.yaml"))?;

    let mut trainer = Trainer::build(config.trainer.clone())?;
    let mut agent = Agent::build(config.agent.clone())?;
    let mut opt = config.opt.build(agent.varmap().all_vars())?;
    let mut buffer = ReplayBuffer::build(&config.replay_buffer);
    let mut checkpointer = DirCheckpointer::new(model_dir);
    let env = Corridor::build(&config.env, 0)?;

    let state = trainer.train(
        env,
        &mut agent,
        &mut opt,
        &mut buffer,
        n_episodes,
        &mut checkpointer,
        recorder,
    )?;
    info!(
        "Trained {} episodes in {} steps, mean reward over last 10 episodes: {:?}",
        state.episode_rewards.len(),
        state.steps_done,
        state.mean_reward_last(10)
    );

    Ok((agent, state))
}

/// Loads the latest checkpoint in `model_dir` into a fresh agent.
pub fn load_latest(config: &RunConfig, model_dir: &Path) -> Result<Agent> {
    let env_id = Corridor::build(&config.env, 0)?.id().to_string();
    let (tag, path) = DirCheckpointer::new(model_dir)
        .latest(&env_id)?
        .ok_or_else(|| anyhow!("No checkpoint of {} in {:?}", env_id, model_dir))?;
    info!("Load the checkpoint of episode {} from {:?}", tag.episode, &path);

    let mut agent = Agent::build(config.agent.clone())?;
    agent.load_params(&path)?;
    Ok(agent)
}

/// Runs `n_episodes` greedy episodes and returns their rewards.
pub fn eval(config: &RunConfig, agent: &mut Agent, n_episodes: usize) -> Result<Vec<f32>> {
    let env = Corridor::build(&config.env, 0)?;
    let mut evaluator = DefaultEvaluator::new(config.evaluator.clone());
    let rewards = evaluator.evaluate(env, agent, n_episodes)?;
    info!("Evaluation rewards: {:?}", rewards);
    Ok(rewards)
}
