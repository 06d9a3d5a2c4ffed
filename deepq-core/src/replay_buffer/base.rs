//! Simple generic replay buffer.
use super::{SimpleReplayBufferConfig, StdBatch};
use crate::{error::DqnError, ExperienceBufferBase, ReplayBufferBase, Transition};
use anyhow::Result;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// A fixed-capacity replay buffer with uniform sampling.
///
/// Once full, the oldest transition is overwritten.
pub struct SimpleReplayBuffer<O, A> {
    capacity: usize,
    i: usize,
    data: Vec<Transition<O, A>>,
    rng: StdRng,
}

impl<O, A> SimpleReplayBuffer<O, A>
where
    O: Clone,
    A: Clone,
{
    fn sample_indices(&mut self, size: usize) -> Vec<usize> {
        let n = self.data.len();
        (0..size).map(|_| self.rng.gen_range(0..n)).collect()
    }
}

impl<O, A> ExperienceBufferBase for SimpleReplayBuffer<O, A> {
    type Item = Transition<O, A>;

    fn len(&self) -> usize {
        self.data.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn push(&mut self, tr: Self::Item) -> Result<()> {
        if self.data.len() < self.capacity {
            self.data.push(tr);
        } else {
            self.data[self.i] = tr;
        }
        self.i = (self.i + 1) % self.capacity;
        Ok(())
    }
}

impl<O, A> ReplayBufferBase for SimpleReplayBuffer<O, A>
where
    O: Clone,
    A: Clone,
{
    type Config = SimpleReplayBufferConfig;
    type Batch = StdBatch<O, A>;

    fn build(config: &Self::Config) -> Self {
        let capacity = config.capacity.max(1);

        Self {
            capacity,
            i: 0,
            data: Vec::with_capacity(capacity),
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// Samples `size` transitions uniformly with replacement.
    fn batch(&mut self, size: usize) -> Result<Self::Batch> {
        if self.data.is_empty() {
            return Err(DqnError::EmptyReplayBuffer.into());
        }

        let ixs = self.sample_indices(size);
        let mut batch = StdBatch {
            obs: Vec::with_capacity(size),
            act: Vec::with_capacity(size),
            next_obs: Vec::with_capacity(size),
            reward: Vec::with_capacity(size),
            is_done: Vec::with_capacity(size),
        };

        for ix in ixs {
            let tr = &self.data[ix];
            batch.obs.push(tr.obs.clone());
            batch.act.push(tr.act.clone());
            batch.next_obs.push(tr.next_obs.clone());
            batch.reward.push(tr.reward);
            batch.is_done.push(tr.is_terminated as i8);
        }

        Ok(batch)
    }
}
