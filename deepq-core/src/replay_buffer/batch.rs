//! A generic implementation of [`TransitionBatch`](crate::TransitionBatch).
use crate::TransitionBatch;

/// A batch of transitions sampled from [`SimpleReplayBuffer`](super::SimpleReplayBuffer).
///
/// The batch is transient: it is consumed by the loss and then discarded.
#[derive(Clone, Debug)]
pub struct StdBatch<O, A> {
    /// Observations.
    pub obs: Vec<O>,

    /// Actions.
    pub act: Vec<A>,

    /// Next observations.
    pub next_obs: Vec<O>,

    /// Rewards.
    pub reward: Vec<f32>,

    /// Done flags, `1` for terminal transitions.
    pub is_done: Vec<i8>,
}

impl<O, A> TransitionBatch for StdBatch<O, A> {
    type ObsBatch = Vec<O>;
    type ActBatch = Vec<A>;

    fn unpack(self) -> (Vec<O>, Vec<A>, Vec<O>, Vec<f32>, Vec<i8>) {
        (self.obs, self.act, self.next_obs, self.reward, self.is_done)
    }

    fn len(&self) -> usize {
        self.reward.len()
    }

    fn obs(&self) -> &Vec<O> {
        &self.obs
    }

    fn act(&self) -> &Vec<A> {
        &self.act
    }

    fn next_obs(&self) -> &Vec<O> {
        &self.next_obs
    }

    fn reward(&self) -> &[f32] {
        &self.reward
    }

    fn is_done(&self) -> &[i8] {
        &self.is_done
    }
}
