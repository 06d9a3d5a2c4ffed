//! Default implementation of the [`Evaluator`] trait.
use super::Evaluator;
use crate::{Agent, Env, ScopedEnv};
use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::{thread, time::Duration};

/// Configuration of [`DefaultEvaluator`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct EvaluatorConfig {
    /// Renders every step if `true`.
    pub render: bool,

    /// Wait after rendering a step, in milliseconds.
    pub render_wait_millis: u64,

    /// If given, episodes are recorded under a label derived from this context.
    pub video_context: Option<String>,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            render: false,
            render_wait_millis: 20,
            video_context: None,
        }
    }
}

impl EvaluatorConfig {
    /// Enables or disables rendering.
    pub fn render(mut self, v: bool) -> Self {
        self.render = v;
        self
    }

    /// Sets the wait after rendering a step.
    pub fn render_wait_millis(mut self, v: u64) -> Self {
        self.render_wait_millis = v;
        self
    }

    /// Records episodes under the given context.
    pub fn video_context(mut self, v: impl Into<String>) -> Self {
        self.video_context = Some(v.into());
        self
    }
}

/// Runs episodes with the greedy policy (`epsilon == 0`).
///
/// The agent is switched to evaluation mode for the duration of
/// [`Evaluator::evaluate`] and its previous mode is restored afterwards.
/// No replay buffer is involved and no loss is computed.
pub struct DefaultEvaluator {
    config: EvaluatorConfig,
}

impl DefaultEvaluator {
    /// Constructs a new [`DefaultEvaluator`].
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    fn run_episode<E, A>(&self, env: &mut E, agent: &mut A, episode: usize) -> Result<f32>
    where
        E: Env,
        A: Agent<E>,
    {
        let mut obs = env.reset()?;
        let mut episode_reward = 0f32;

        loop {
            let act = agent.act(&obs, 0.0)?;
            let step = env.step(&act)?;
            episode_reward += step.reward;

            if self.config.render {
                env.render().with_context(|| {
                    format!(
                        "Rendering failed in episode {} (reward so far {})",
                        episode, episode_reward
                    )
                })?;
                thread::sleep(Duration::from_millis(self.config.render_wait_millis));
            }

            if step.is_done() {
                return Ok(episode_reward);
            }
            obs = step.obs;
        }
    }

    fn run_episodes<E, A>(&self, env: &mut E, agent: &mut A, n_episodes: usize) -> Result<Vec<f32>>
    where
        E: Env,
        A: Agent<E>,
    {
        if let Some(context) = &self.config.video_context {
            let label = format!("dqn_{}_video_{}", env.id(), context);
            if let Err(e) = env.record_video(&label) {
                warn!("Episodes are not recorded: {:?}", e);
            }
        }

        let mut rewards = Vec::with_capacity(n_episodes);
        for ix in 0..n_episodes {
            let r = self.run_episode(env, agent, ix + 1)?;
            info!("Finished Episode {} with reward {}", ix + 1, r);
            rewards.push(r);
        }
        Ok(rewards)
    }
}

impl<E, A> Evaluator<E, A> for DefaultEvaluator
where
    E: Env,
    A: Agent<E>,
{
    fn evaluate(&mut self, env: E, agent: &mut A, n_episodes: usize) -> Result<Vec<f32>> {
        let mut env = ScopedEnv::new(env);
        let was_train = agent.is_train();
        agent.eval();

        let result = self.run_episodes(&mut *env, agent, n_episodes);

        if was_train {
            agent.train();
        }
        let closed = env.close();
        let rewards = result?;
        closed?;
        Ok(rewards)
    }
}
