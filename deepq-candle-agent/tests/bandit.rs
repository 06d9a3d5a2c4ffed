//! Trains and evaluates a candle DQN agent on a two-armed bandit.
use anyhow::Result;
use candle_core::{Device, Tensor};
use deepq_candle_agent::{
    dqn::{Dqn, DqnConfig, DqnModelConfig},
    mlp::{Mlp, MlpConfig},
    opt::OptimizerConfig,
};
use deepq_core::{
    record::BufferedRecorder,
    replay_buffer::{SimpleReplayBuffer, SimpleReplayBufferConfig},
    DefaultEvaluator, DirCheckpointer, Env, Evaluator, EvaluatorConfig, Obs, Act, Policy,
    ReplayBufferBase, SaveParams, Step, Trainer, TrainerConfig,
};
use tempdir::TempDir;

#[derive(Clone, Debug)]
struct BanditObs;

impl Obs for BanditObs {}

impl TryFrom<BanditObs> for Tensor {
    type Error = candle_core::Error;

    fn try_from(_obs: BanditObs) -> candle_core::Result<Tensor> {
        Tensor::new(&[1.0f32], &Device::Cpu)
    }
}

#[derive(Clone, Debug, PartialEq)]
struct BanditAct(i64);

impl Act for BanditAct {}

impl From<i64> for BanditAct {
    fn from(a: i64) -> Self {
        Self(a)
    }
}

impl From<BanditAct> for i64 {
    fn from(a: BanditAct) -> i64 {
        a.0
    }
}

/// Every episode is a single pull; arm `1` pays `1`, arm `0` pays nothing.
struct Bandit;

impl Env for Bandit {
    type Config = ();
    type Obs = BanditObs;
    type Act = BanditAct;
    type Info = ();

    fn build(_config: &(), _seed: i64) -> Result<Self> {
        Ok(Self)
    }

    fn reset(&mut self) -> Result<BanditObs> {
        Ok(BanditObs)
    }

    fn step(&mut self, a: &BanditAct) -> Result<Step<Self>> {
        let reward = if a.0 == 1 { 1.0 } else { 0.0 };
        Ok(Step::new(BanditObs, reward, true, false, ()))
    }

    fn id(&self) -> &str {
        "Bandit-v0"
    }
}

type Agent = Dqn<Bandit, Mlp>;

fn agent() -> Result<Agent> {
    let config = DqnConfig::default()
        .model_config(DqnModelConfig::default().q_config(MlpConfig::new(1, vec![16], 2, false)))
        .seed(1);
    Agent::build(config)
}

#[test]
fn test_train_and_evaluate() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let tmp_dir = TempDir::new("bandit")?;

    let mut agent = agent()?;
    let mut opt = OptimizerConfig::Adam { lr: 0.01 }.build(agent.varmap().all_vars())?;
    let mut buffer = SimpleReplayBuffer::build(&SimpleReplayBufferConfig::default().capacity(1000));
    let mut checkpointer = DirCheckpointer::new(tmp_dir.path());
    let mut recorder = BufferedRecorder::new();
    let mut trainer = Trainer::build(
        TrainerConfig::default()
            .epsilon(1.0, 0.05, 100.0)
            .batch_size(16)
            .initial_memory(20)
            .progress_interval(100),
    )?;

    let state = trainer.train(
        Bandit,
        &mut agent,
        &mut opt,
        &mut buffer,
        400,
        &mut checkpointer,
        &mut recorder,
    )?;

    assert_eq!(state.steps_done, 400);
    assert_eq!(state.episode_rewards.len(), 400);
    assert_eq!(state.losses.len(), 400 - 20);
    assert!(state.losses.iter().all(|l| l.is_finite()));
    assert_eq!(recorder.iter().count(), 4);
    for n in [10, 100, 200, 300, 400] {
        assert!(tmp_dir.path().join(format!("Bandit-v0_episode_{}.pth", n)).exists());
    }

    // Greedy evaluation pulls the paying arm.
    let mut evaluator = DefaultEvaluator::new(EvaluatorConfig::default().render_wait_millis(0));
    let rewards = evaluator.evaluate(Bandit, &mut agent, 5)?;
    assert_eq!(rewards, vec![1.0; 5]);
    Ok(())
}

#[test]
fn test_checkpoint_restores_greedy_policy() -> Result<()> {
    let tmp_dir = TempDir::new("bandit_params")?;
    let path = tmp_dir.path().join("Bandit-v0_episode_1.pth");
    let obs = BanditObs;

    let mut agent1 = agent()?;
    agent1.save_params(&path)?;
    let q1 = agent1.q_values(vec![obs.clone()])?.to_vec2::<f32>()?;

    let mut agent2 = Dqn::<Bandit, Mlp>::build(
        DqnConfig::default()
            .model_config(DqnModelConfig::default().q_config(MlpConfig::new(1, vec![16], 2, false)))
            .seed(2),
    )?;
    agent2.load_params(&path)?;
    let q2 = agent2.q_values(vec![obs.clone()])?.to_vec2::<f32>()?;
    assert_eq!(q1, q2);

    let a1 = agent1.act(&obs, 0.0)?;
    let a2 = agent2.act(&obs, 0.0)?;
    assert_eq!(a1, a2);
    Ok(())
}
