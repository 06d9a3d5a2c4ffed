//! A one-dimensional corridor for smoke runs.
//!
//! The agent starts at the left end and moves left (`0`) or right (`1`).
//! Reaching the right end pays `1` and terminates the episode; an episode that
//! has not terminated after `max_steps` steps is truncated.
use anyhow::{anyhow, Result};
use candle_core::{Device, Tensor};
use deepq_core::{Act, Env, Obs, Step};
use serde::{Deserialize, Serialize};

/// Configuration of [`Corridor`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct CorridorConfig {
    /// Number of cells.
    pub length: usize,

    /// Episodes are truncated after this number of steps.
    pub max_steps: usize,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            length: 8,
            max_steps: 50,
        }
    }
}

/// One-hot encoding of the position of the agent.
#[derive(Clone, Debug, PartialEq)]
pub struct CorridorObs(Vec<f32>);

impl CorridorObs {
    fn new(pos: usize, length: usize) -> Self {
        let mut v = vec![0f32; length];
        v[pos] = 1.0;
        Self(v)
    }
}

impl Obs for CorridorObs {}

impl TryFrom<CorridorObs> for Tensor {
    type Error = candle_core::Error;

    fn try_from(obs: CorridorObs) -> candle_core::Result<Tensor> {
        let n = obs.0.len();
        Tensor::from_vec(obs.0, (n,), &Device::Cpu)
    }
}

/// Move left (`0`) or right (`1`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CorridorAct(pub i64);

impl Act for CorridorAct {}

impl From<i64> for CorridorAct {
    fn from(a: i64) -> Self {
        Self(a)
    }
}

impl From<CorridorAct> for i64 {
    fn from(a: CorridorAct) -> i64 {
        a.0
    }
}

/// The corridor environment.
pub struct Corridor {
    config: CorridorConfig,
    pos: usize,
    t: usize,
}

impl Corridor {
    /// Number of actions.
    pub const N_ACTIONS: usize = 2;

    fn obs(&self) -> CorridorObs {
        CorridorObs::new(self.pos, self.config.length)
    }
}

impl Env for Corridor {
    type Config = CorridorConfig;
    type Obs = CorridorObs;
    type Act = CorridorAct;
    type Info = ();

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        if config.length < 2 {
            return Err(anyhow!("Corridor needs at least 2 cells, got {}", config.length));
        }
        Ok(Self {
            config: config.clone(),
            pos: 0,
            t: 0,
        })
    }

    fn reset(&mut self) -> Result<CorridorObs> {
        self.pos = 0;
        self.t = 0;
        Ok(self.obs())
    }

    fn step(&mut self, a: &CorridorAct) -> Result<Step<Self>> {
        self.pos = match a.0 {
            0 => self.pos.saturating_sub(1),
            1 => self.pos + 1,
            _ => return Err(anyhow!("Invalid action {}", a.0)),
        };
        self.t += 1;

        let is_terminated = self.pos == self.config.length - 1;
        let is_truncated = !is_terminated && self.t >= self.config.max_steps;
        let reward = if is_terminated { 1.0 } else { 0.0 };
        Ok(Step::new(self.obs(), reward, is_terminated, is_truncated, ()))
    }

    fn render(&mut self) -> Result<()> {
        let cells = (0..self.config.length)
            .map(|i| if i == self.pos { 'A' } else { '.' })
            .collect::<String>();
        println!("|{}| t = {}", cells, self.t);
        Ok(())
    }

    fn id(&self) -> &str {
        "Corridor-v0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor(length: usize, max_steps: usize) -> Result<Corridor> {
        Corridor::build(&CorridorConfig { length, max_steps }, 0)
    }

    #[test]
    fn test_reach_goal() -> Result<()> {
        let mut env = corridor(3, 10)?;
        assert_eq!(env.reset()?, CorridorObs(vec![1.0, 0.0, 0.0]));

        let step = env.step(&CorridorAct(1))?;
        assert_eq!((step.reward, step.is_done()), (0.0, false));
        let step = env.step(&CorridorAct(1))?;
        assert_eq!(step.obs, CorridorObs(vec![0.0, 0.0, 1.0]));
        assert_eq!(step.reward, 1.0);
        assert!(step.is_terminated && !step.is_truncated);
        Ok(())
    }

    #[test]
    fn test_truncation_at_wall() -> Result<()> {
        let mut env = corridor(4, 3)?;
        env.reset()?;
        for _ in 0..2 {
            let step = env.step(&CorridorAct(0))?;
            assert_eq!(step.obs, CorridorObs(vec![1.0, 0.0, 0.0, 0.0]));
            assert!(!step.is_done());
        }
        let step = env.step(&CorridorAct(0))?;
        assert!(step.is_truncated && !step.is_terminated);
        Ok(())
    }

    #[test]
    fn test_invalid_input() -> Result<()> {
        assert!(corridor(1, 10).is_err());
        let mut env = corridor(3, 10)?;
        env.reset()?;
        assert!(env.step(&CorridorAct(2)).is_err());
        Ok(())
    }

    #[test]
    fn test_obs_into_tensor() -> Result<()> {
        let t = Tensor::try_from(CorridorObs::new(1, 3))?;
        assert_eq!(t.to_vec1::<f32>()?, vec![0.0, 1.0, 0.0]);
        Ok(())
    }
}
