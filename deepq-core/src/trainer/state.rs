/// Counters and histories of a single training run.
///
/// Owned by the [`Trainer`](super::Trainer) while a run is in progress and
/// handed back to the caller when it finishes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingState {
    /// Number of environment steps taken.
    pub steps_done: usize,

    /// Total reward of each completed episode, in completion order.
    pub episode_rewards: Vec<f32>,

    /// Loss of each optimization step, in step order.
    pub losses: Vec<f32>,
}

impl TrainingState {
    /// Mean reward over the last `n` completed episodes.
    ///
    /// Returns `None` before the first episode completes.
    pub fn mean_reward_last(&self, n: usize) -> Option<f32> {
        let k = self.episode_rewards.len().min(n);
        if k == 0 {
            return None;
        }
        let tail = &self.episode_rewards[self.episode_rewards.len() - k..];
        Some(tail.iter().sum::<f32>() / k as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_reward_last() {
        let mut state = TrainingState::default();
        assert_eq!(state.mean_reward_last(10), None);
        state.episode_rewards = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(state.mean_reward_last(2), Some(3.5));
        assert_eq!(state.mean_reward_last(10), Some(2.5));
    }
}
