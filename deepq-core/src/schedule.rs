//! Exploration schedule.
use crate::error::DqnError;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Exponentially annealed exploration probability.
///
/// `epsilon(t) = eps_end + (eps_start - eps_end) * exp(-t / eps_decay)`,
/// where `t` is the number of environment steps taken so far.
/// The value equals `eps_start` at `t = 0` and approaches `eps_end`
/// asymptotically.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy)]
pub struct EpsilonSchedule {
    /// Exploration probability at the first step.
    pub eps_start: f64,

    /// Asymptotic exploration probability.
    pub eps_end: f64,

    /// Decay constant in environment steps. Must be positive.
    pub eps_decay: f64,
}

impl Default for EpsilonSchedule {
    fn default() -> Self {
        Self {
            eps_start: 1.0,
            eps_end: 0.01,
            eps_decay: 30000.0,
        }
    }
}

impl EpsilonSchedule {
    /// Constructs a schedule.
    pub fn new(eps_start: f64, eps_end: f64, eps_decay: f64) -> Self {
        Self {
            eps_start,
            eps_end,
            eps_decay,
        }
    }

    /// Returns the exploration probability after `steps_done` environment steps.
    #[inline]
    pub fn epsilon(&self, steps_done: usize) -> f64 {
        self.eps_end
            + (self.eps_start - self.eps_end) * (-(steps_done as f64) / self.eps_decay).exp()
    }

    /// Checks the parameters.
    pub fn validate(&self) -> Result<()> {
        if self.eps_decay.is_nan() || self.eps_decay <= 0.0 {
            return Err(DqnError::InvalidConfig(format!(
                "eps_decay must be positive, got {}",
                self.eps_decay
            ))
            .into());
        }
        for (name, v) in [("eps_start", self.eps_start), ("eps_end", self.eps_end)] {
            if !(0.0..=1.0).contains(&v) {
                return Err(
                    DqnError::InvalidConfig(format!("{} must be in [0, 1], got {}", name, v))
                        .into(),
                );
            }
        }
        Ok(())
    }
}
