//! DQN agent implemented with candle.
use super::{config::DqnConfig, explorer::greedy_action, model::DqnModel, EpsilonGreedy};
use crate::{model::SubModel1, td_loss::td_loss, util::OutDim, TdLoss};
use anyhow::Result;
use candle_core::{Device, Tensor};
use candle_nn::VarMap;
use deepq_core::{replay_buffer::StdBatch, Agent, Env, Policy, SaveParams, TransitionBatch};
use log::trace;
use serde::{de::DeserializeOwned, Serialize};
use std::{marker::PhantomData, path::Path};

/// DQN agent implemented with candle.
///
/// A single action-value network evaluates both the current and the next
/// observations of a batch. Observations are converted into 1-dimensional
/// tensors with `TryInto<Tensor>` and stacked along a new batch axis; actions
/// are discrete indices.
pub struct Dqn<E, Q>
where
    E: Env,
    Q: SubModel1<Input = Tensor, Output = Tensor>,
    Q::Config: DeserializeOwned + Serialize + OutDim + Clone,
{
    qnet: DqnModel<Q>,
    train: bool,
    explorer: EpsilonGreedy,
    device: Device,
    phantom: PhantomData<E>,
}

impl<E, Q> Dqn<E, Q>
where
    E: Env,
    E::Obs: TryInto<Tensor, Error = candle_core::Error>,
    E::Act: From<i64> + Into<i64>,
    Q: SubModel1<Input = Tensor, Output = Tensor>,
    Q::Config: DeserializeOwned + Serialize + OutDim + Clone,
{
    /// Constructs DQN agent in evaluation mode.
    pub fn build(config: DqnConfig<Q::Config>) -> Result<Self> {
        let device = config.device.to_candle()?;
        let qnet = DqnModel::build(config.model_config, &device)?;

        Ok(Dqn {
            qnet,
            train: false,
            explorer: EpsilonGreedy::new(config.seed),
            device,
            phantom: PhantomData,
        })
    }

    /// Returns the variables of the action-value network.
    pub fn varmap(&self) -> &VarMap {
        self.qnet.varmap()
    }

    /// Number of actions.
    pub fn n_actions(&self) -> usize {
        self.qnet.out_dim
    }

    /// Action-values of a batch of observations, `[batch_size, n_actions]`.
    pub fn q_values(&self, obs: Vec<E::Obs>) -> Result<Tensor> {
        let xs = obs
            .into_iter()
            .map(|o| -> Result<Tensor> {
                let x: Tensor = o.try_into()?;
                Ok(x.to_device(&self.device)?)
            })
            .collect::<Result<Vec<Tensor>>>()?;
        let xs = Tensor::stack(&xs, 0)?;
        self.qnet.forward(&xs)
    }
}

impl<E, Q> Policy<E> for Dqn<E, Q>
where
    E: Env,
    E::Obs: TryInto<Tensor, Error = candle_core::Error>,
    E::Act: From<i64> + Into<i64>,
    Q: SubModel1<Input = Tensor, Output = Tensor>,
    Q::Config: DeserializeOwned + Serialize + OutDim + Clone,
{
    fn act(&mut self, obs: &E::Obs, epsilon: f64) -> Result<E::Act> {
        let a = if self.explorer.explore(epsilon) {
            self.explorer.random_action(self.n_actions())
        } else {
            let q = self.q_values(vec![obs.clone()])?.detach();
            greedy_action(&q)?
        };
        trace!("act: epsilon = {}, a = {}", epsilon, a);
        Ok(a.into())
    }
}

impl<E, Q> SaveParams for Dqn<E, Q>
where
    E: Env,
    Q: SubModel1<Input = Tensor, Output = Tensor>,
    Q::Config: DeserializeOwned + Serialize + OutDim + Clone,
{
    fn save_params(&self, path: &Path) -> Result<()> {
        self.qnet.save(path)
    }

    fn load_params(&mut self, path: &Path) -> Result<()> {
        self.qnet.load(path)
    }
}

impl<E, Q> Agent<E> for Dqn<E, Q>
where
    E: Env,
    E::Obs: TryInto<Tensor, Error = candle_core::Error>,
    E::Act: From<i64> + Into<i64>,
    Q: SubModel1<Input = Tensor, Output = Tensor>,
    Q::Config: DeserializeOwned + Serialize + OutDim + Clone,
{
    type Batch = StdBatch<E::Obs, E::Act>;
    type Loss = TdLoss;

    fn train(&mut self) {
        self.train = true;
    }

    fn eval(&mut self) {
        self.train = false;
    }

    fn is_train(&self) -> bool {
        self.train
    }

    fn td_loss(&self, batch: Self::Batch, discount_factor: f64) -> Result<TdLoss> {
        let n = batch.len();
        let (obs, act, next_obs, reward, is_done) = batch.unpack();

        let q_old = self.q_values(obs)?;
        let q_new = self.q_values(next_obs)?;
        let act = act.into_iter().map(Into::into).collect::<Vec<i64>>();
        let act = Tensor::from_vec(act, (n,), &self.device)?;
        let reward = Tensor::from_vec(reward, (n,), &self.device)?;
        let is_done = is_done.into_iter().map(|d| d as f32).collect::<Vec<_>>();
        let is_done = Tensor::from_vec(is_done, (n,), &self.device)?;

        let loss = td_loss(&q_old, &q_new, &act, &reward, &is_done, discount_factor)?;
        Ok(TdLoss(loss))
    }
}
