//! Scripted collaborators used in tests.
//!
//! The environment and agent report their interactions through shared trackers,
//! so that a test can inspect them after the collaborator has been moved into
//! a training or evaluation loop.
use crate::{
    checkpoint::{CheckpointTag, Checkpointer},
    replay_buffer::StdBatch,
    Act, Agent, Env, LossValue, Obs, Optimizer, Policy, SaveParams, Step, TransitionBatch,
};
use anyhow::{anyhow, Result};
use std::{
    cell::{Cell, RefCell},
    path::{Path, PathBuf},
    rc::Rc,
};

/// Dummy observation, the number of steps taken in the current episode.
#[derive(Clone, Debug, PartialEq)]
pub struct DummyObs(pub usize);

impl Obs for DummyObs {}

/// Dummy action.
#[derive(Clone, Debug, PartialEq)]
pub struct DummyAct(pub usize);

impl Act for DummyAct {}

/// Interactions observed by [`DummyEnv`].
#[derive(Debug, Default)]
pub struct EnvTracker {
    /// Number of calls to `reset()`.
    pub resets: Cell<usize>,
    /// Number of successful calls to `step()`.
    pub steps: Cell<usize>,
    /// Number of calls to `render()`.
    pub renders: Cell<usize>,
    /// Number of calls to `close()`.
    pub closes: Cell<usize>,
}

/// Configuration of [`DummyEnv`].
#[derive(Clone, Debug)]
pub struct DummyEnvConfig {
    /// Episode lengths, used cyclically.
    pub episode_lens: Vec<usize>,
    /// Reward of every step.
    pub reward: f32,
    /// If set, the step with this global (1-based) index fails.
    pub fail_at_step: Option<usize>,
    /// If `true`, `render()` fails.
    pub fail_render: bool,
    /// If `true`, the last step of an episode is truncated instead of terminated.
    pub truncate: bool,
    /// Shared tracker.
    pub tracker: Rc<EnvTracker>,
}

impl DummyEnvConfig {
    /// Episodes of fixed length `len` with unit rewards.
    pub fn new(len: usize) -> Self {
        Self {
            episode_lens: vec![len],
            reward: 1.0,
            fail_at_step: None,
            fail_render: false,
            truncate: false,
            tracker: Rc::new(EnvTracker::default()),
        }
    }
}

/// An environment whose episodes last a scripted number of steps.
pub struct DummyEnv {
    config: DummyEnvConfig,
    n_episodes: usize,
    t: usize,
    total_steps: usize,
}

impl Env for DummyEnv {
    type Config = DummyEnvConfig;
    type Obs = DummyObs;
    type Act = DummyAct;
    type Info = ();

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            n_episodes: 0,
            t: 0,
            total_steps: 0,
        })
    }

    fn reset(&mut self) -> Result<DummyObs> {
        let tracker = &self.config.tracker;
        tracker.resets.set(tracker.resets.get() + 1);
        self.n_episodes += 1;
        self.t = 0;
        Ok(DummyObs(0))
    }

    fn step(&mut self, _a: &DummyAct) -> Result<Step<Self>> {
        if self.config.fail_at_step == Some(self.total_steps + 1) {
            return Err(anyhow!("Simulator failure at step {}", self.total_steps + 1));
        }
        let tracker = &self.config.tracker;
        tracker.steps.set(tracker.steps.get() + 1);
        self.t += 1;
        self.total_steps += 1;

        let lens = &self.config.episode_lens;
        let len = lens[(self.n_episodes - 1) % lens.len()];
        let is_last = self.t >= len;
        let (is_terminated, is_truncated) = match self.config.truncate {
            true => (false, is_last),
            false => (is_last, false),
        };
        Ok(Step::new(
            DummyObs(self.t),
            self.config.reward,
            is_terminated,
            is_truncated,
            (),
        ))
    }

    fn render(&mut self) -> Result<()> {
        if self.config.fail_render {
            return Err(anyhow!("Display is unavailable"));
        }
        let tracker = &self.config.tracker;
        tracker.renders.set(tracker.renders.get() + 1);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let tracker = &self.config.tracker;
        tracker.closes.set(tracker.closes.get() + 1);
        Ok(())
    }

    fn id(&self) -> &str {
        "Dummy-v0"
    }
}

/// Interactions observed by [`DummyAgent`].
#[derive(Debug, Default)]
pub struct AgentTracker {
    /// Exploration probabilities passed to `act()`, in call order.
    pub epsilons: RefCell<Vec<f64>>,
    /// Whether the agent was in training mode at each `act()` call.
    pub train_modes: RefCell<Vec<bool>>,
    /// Number of calls to `td_loss()`.
    pub td_loss_calls: Cell<usize>,
    /// Terminal flags of every batch passed to `td_loss()`.
    pub is_done: RefCell<Vec<i8>>,
}

/// An agent that always takes action `0`.
pub struct DummyAgent {
    train: bool,
    fail_save: bool,
    panic_at_act: Option<usize>,
    tracker: Rc<AgentTracker>,
}

impl DummyAgent {
    /// Constructs the agent with a shared tracker.
    pub fn new(tracker: Rc<AgentTracker>) -> Self {
        Self {
            train: false,
            fail_save: false,
            panic_at_act: None,
            tracker,
        }
    }

    /// Makes `save_params()` fail.
    pub fn fail_save(mut self) -> Self {
        self.fail_save = true;
        self
    }

    /// Panics in the `n`-th call (1-based) to `act()`.
    pub fn panic_at_act(mut self, n: usize) -> Self {
        self.panic_at_act = Some(n);
        self
    }
}

impl Policy<DummyEnv> for DummyAgent {
    fn act(&mut self, _obs: &DummyObs, epsilon: f64) -> Result<DummyAct> {
        self.tracker.train_modes.borrow_mut().push(self.train);
        let n = {
            let mut epsilons = self.tracker.epsilons.borrow_mut();
            epsilons.push(epsilon);
            epsilons.len()
        };
        if self.panic_at_act == Some(n) {
            panic!("Agent failure at action {}", n);
        }
        Ok(DummyAct(0))
    }
}

impl SaveParams for DummyAgent {
    fn save_params(&self, path: &Path) -> Result<()> {
        match self.fail_save {
            true => Err(anyhow!("Disk is full")),
            false => Ok(std::fs::write(path, "dummy")?),
        }
    }

    fn load_params(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

impl Agent<DummyEnv> for DummyAgent {
    type Batch = StdBatch<DummyObs, DummyAct>;
    type Loss = DummyLoss;

    fn train(&mut self) {
        self.train = true;
    }

    fn eval(&mut self) {
        self.train = false;
    }

    fn is_train(&self) -> bool {
        self.train
    }

    fn td_loss(&self, batch: Self::Batch, _discount_factor: f64) -> Result<DummyLoss> {
        let tracker = &self.tracker;
        tracker.td_loss_calls.set(tracker.td_loss_calls.get() + 1);
        tracker.is_done.borrow_mut().extend_from_slice(batch.is_done());
        Ok(DummyLoss(batch.len() as f32))
    }
}

/// Loss of [`DummyAgent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DummyLoss(pub f32);

impl LossValue for DummyLoss {
    fn value(&self) -> Result<f32> {
        Ok(self.0)
    }
}

/// Counts optimization steps.
#[derive(Debug, Default)]
pub struct DummyOptimizer {
    /// Number of calls to `backward_step()`.
    pub n_steps: usize,
}

impl Optimizer for DummyOptimizer {
    type Loss = DummyLoss;

    fn backward_step(&mut self, _loss: &DummyLoss) -> Result<()> {
        self.n_steps += 1;
        Ok(())
    }
}

/// Remembers requested checkpoint tags without touching the filesystem.
#[derive(Debug, Default)]
pub struct RecordingCheckpointer {
    /// Requested tags, in request order.
    pub tags: Vec<CheckpointTag>,
    /// If `true`, every request fails after being recorded.
    pub fail: bool,
}

impl Checkpointer for RecordingCheckpointer {
    fn checkpoint(&mut self, tag: &CheckpointTag, _params: &dyn SaveParams) -> Result<PathBuf> {
        self.tags.push(tag.clone());
        match self.fail {
            true => Err(anyhow!("Checkpoint storage is unavailable")),
            false => Ok(PathBuf::from(tag.file_name())),
        }
    }
}
