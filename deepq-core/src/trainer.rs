//! Train [`Agent`].
mod config;
mod state;
use crate::{
    checkpoint::{CheckpointTag, Checkpointer},
    error::DqnError,
    record::{Record, RecordValue, Recorder},
    Agent, Env, EpsilonSchedule, ExperienceBufferBase, LossValue, Optimizer, ReplayBufferBase,
    SaveParams, ScopedEnv, Transition,
};
use anyhow::Result;
use chrono::Local;
pub use config::TrainerConfig;
use log::{debug, info, warn};
pub use state::TrainingState;

/// Number of recent episodes averaged in progress reports.
const N_EPISODES_FOR_MEAN: usize = 10;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Manages the training loop of a deep Q-network.
///
/// # Training loop
///
/// For each episode:
///
/// 1. Reset [`Env`] and the episode reward.
/// 2. Until the episode ends:
///     1. Compute `epsilon` from `steps_done` with [`EpsilonSchedule`].
///     2. Select an action with [`Policy::act`](crate::Policy::act).
///     3. `steps_done += 1`.
///     4. Step the environment, push the transition into the replay buffer and
///        accumulate the reward.
///     5. If the buffer holds more than `initial_memory` transitions, sample a
///        batch, build the loss with [`Agent::td_loss`], apply one
///        [`Optimizer::backward_step`] and record the loss.
///     6. If `steps_done % progress_interval == 0`, write a progress record.
/// 3. Append the episode reward to the reward history.
/// 4. After `first_checkpoint_episode` and every `checkpoint_interval` completed
///    episodes, write a checkpoint tagged with [`Env::id`] and the episode count.
///
/// The environment is closed when all episodes have run, and also when the
/// loop is left with an error.
///
/// # Interaction of objects
///
/// ```mermaid
/// graph LR
///     A[Agent]-->|Env::Act|B[Env]
///     B -->|Env::Obs|A
///     B -->|Transition|D[ReplayBufferBase]
///     D -->|Batch|A
///     A -->|Loss|O[Optimizer]
/// ```
///
/// Progress records and checkpoints are side effects: a failure of the
/// [`Recorder`] or [`Checkpointer`] is logged and training continues.
pub struct Trainer {
    config: TrainerConfig,
    schedule: EpsilonSchedule,
}

impl Trainer {
    /// Constructs a trainer.
    ///
    /// Fails if the configuration is invalid.
    pub fn build(config: TrainerConfig) -> Result<Self> {
        config.validate()?;
        let schedule = config.schedule();
        Ok(Self { config, schedule })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Returns `true` if a checkpoint is due after `n` completed episodes.
    pub fn is_checkpoint_episode(&self, n: usize) -> bool {
        n == self.config.first_checkpoint_episode
            || (self.config.checkpoint_interval > 0 && n % self.config.checkpoint_interval == 0)
    }

    fn check_buffer<R: ExperienceBufferBase>(&self, buffer: &R) -> Result<()> {
        if self.config.batch_size > buffer.capacity() {
            return Err(DqnError::InvalidConfig(format!(
                "batch_size ({}) exceeds the replay buffer capacity ({})",
                self.config.batch_size,
                buffer.capacity()
            ))
            .into());
        }
        if self.config.initial_memory >= buffer.capacity() {
            return Err(DqnError::InvalidConfig(format!(
                "initial_memory ({}) must be smaller than the replay buffer capacity ({})",
                self.config.initial_memory,
                buffer.capacity()
            ))
            .into());
        }
        Ok(())
    }

    fn report_progress(&self, recorder: &mut dyn Recorder, state: &TrainingState) {
        let mut record = Record::from_slice(&[
            ("frame_idx", RecordValue::Scalar(state.steps_done as f32)),
            (
                "episode_rewards",
                RecordValue::Array1(state.episode_rewards.clone()),
            ),
            ("losses", RecordValue::Array1(state.losses.clone())),
            ("time", RecordValue::DateTime(Local::now())),
        ]);
        if let Some(mean) = state.mean_reward_last(N_EPISODES_FOR_MEAN) {
            record.insert("mean_reward_last_10", RecordValue::Scalar(mean));
        }
        if let Some(&loss) = state.losses.last() {
            record.insert("loss", RecordValue::Scalar(loss));
        }

        info!(
            "Total frames {}. Avg reward over last {} episodes: {:?}",
            state.steps_done,
            N_EPISODES_FOR_MEAN,
            state.mean_reward_last(N_EPISODES_FOR_MEAN)
        );
        if let Err(e) = recorder.write(record) {
            warn!(
                "Failed to write progress at frame {}: {:?}",
                state.steps_done, e
            );
        }
    }

    fn save_checkpoint(
        checkpointer: &mut dyn Checkpointer,
        tag: &CheckpointTag,
        params: &dyn SaveParams,
    ) {
        info!("Saving weights at Episode {} ...", tag.episode);
        match checkpointer.checkpoint(tag, params) {
            Ok(path) => info!("Saved the model in {:?}.", path),
            Err(e) => warn!(
                "Failed to save the model at episode {}: {:?}",
                tag.episode, e
            ),
        }
    }

    /// Performs a training step and returns `true` at the end of an episode.
    ///
    /// `obs` is replaced with the next observation and the step reward is
    /// added to `episode_reward`.
    #[allow(clippy::too_many_arguments)]
    pub fn train_step<E, A, O, R>(
        &self,
        env: &mut E,
        agent: &mut A,
        optimizer: &mut O,
        buffer: &mut R,
        obs: &mut E::Obs,
        episode_reward: &mut f32,
        state: &mut TrainingState,
        recorder: &mut dyn Recorder,
    ) -> Result<bool>
    where
        E: Env,
        A: Agent<E>,
        O: Optimizer<Loss = A::Loss>,
        R: ExperienceBufferBase<Item = Transition<E::Obs, E::Act>>
            + ReplayBufferBase<Batch = A::Batch>,
    {
        let epsilon = self.schedule.epsilon(state.steps_done);
        let act = agent.act(obs, epsilon)?;
        state.steps_done += 1;

        let step = env.step(&act)?;
        let is_done = step.is_done();
        let next_obs = step.obs;
        let prev_obs = std::mem::replace(obs, next_obs.clone());
        buffer.push(Transition::new(
            prev_obs,
            act,
            step.reward,
            next_obs,
            step.is_terminated,
        ))?;
        *episode_reward += step.reward;

        // Optimization step
        if buffer.len() > self.config.initial_memory {
            let batch = buffer.batch(self.config.batch_size)?;
            let loss = agent.td_loss(batch, self.config.gamma)?;
            optimizer.backward_step(&loss)?;
            let loss = loss.value()?;
            debug!("steps_done = {}, loss = {}", state.steps_done, loss);
            state.losses.push(loss);
        }

        if self.config.progress_interval > 0 && state.steps_done % self.config.progress_interval == 0
        {
            self.report_progress(recorder, state);
        }

        Ok(is_done)
    }

    /// Train the agent for `n_episodes` episodes.
    ///
    /// The agent is set to training mode and its parameters are mutated in
    /// place by `optimizer`. The returned [`TrainingState`] holds the step
    /// count and the reward and loss histories of the run.
    #[allow(clippy::too_many_arguments)]
    pub fn train<E, A, O, R>(
        &mut self,
        env: E,
        agent: &mut A,
        optimizer: &mut O,
        buffer: &mut R,
        n_episodes: usize,
        checkpointer: &mut dyn Checkpointer,
        recorder: &mut dyn Recorder,
    ) -> Result<TrainingState>
    where
        E: Env,
        A: Agent<E>,
        O: Optimizer<Loss = A::Loss>,
        R: ExperienceBufferBase<Item = Transition<E::Obs, E::Act>>
            + ReplayBufferBase<Batch = A::Batch>,
    {
        let mut env = ScopedEnv::new(env);
        let result = self.run_episodes(
            &mut *env,
            agent,
            optimizer,
            buffer,
            n_episodes,
            checkpointer,
            recorder,
        );
        let closed = env.close();
        let state = result?;
        closed?;
        Ok(state)
    }

    #[allow(clippy::too_many_arguments)]
    fn run_episodes<E, A, O, R>(
        &mut self,
        env: &mut E,
        agent: &mut A,
        optimizer: &mut O,
        buffer: &mut R,
        n_episodes: usize,
        checkpointer: &mut dyn Checkpointer,
        recorder: &mut dyn Recorder,
    ) -> Result<TrainingState>
    where
        E: Env,
        A: Agent<E>,
        O: Optimizer<Loss = A::Loss>,
        R: ExperienceBufferBase<Item = Transition<E::Obs, E::Act>>
            + ReplayBufferBase<Batch = A::Batch>,
    {
        self.check_buffer(buffer)?;
        let mut state = TrainingState::default();
        agent.train();

        for episode in 0..n_episodes {
            let mut obs = env.reset()?;
            let mut episode_reward = 0f32;

            loop {
                let is_done = self.train_step(
                    env,
                    agent,
                    optimizer,
                    buffer,
                    &mut obs,
                    &mut episode_reward,
                    &mut state,
                    recorder,
                )?;
                if is_done {
                    state.episode_rewards.push(episode_reward);
                    break;
                }
            }
            debug!("Episode {} finished with reward {}", episode + 1, episode_reward);

            let n = episode + 1;
            if self.is_checkpoint_episode(n) {
                let tag = CheckpointTag::new(env.id(), n);
                Self::save_checkpoint(checkpointer, &tag, &*agent);
            }
        }

        Ok(state)
    }
}
