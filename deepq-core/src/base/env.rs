//! Environment.
use super::{Act, Info, Obs, Step};
use crate::error::DqnError;
use anyhow::Result;
use log::warn;
use std::ops::{Deref, DerefMut};

/// Represents an environment, typically an MDP.
///
/// The environment is a stateful sequential simulator: a call to [`Env::step`]
/// must observe the result of the previous call before it is issued.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Resets the environment and returns the initial observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Performes an environment step.
    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>>
    where
        Self: Sized;

    /// Renders the current state of the environment.
    fn render(&mut self) -> Result<()> {
        Ok(())
    }

    /// Releases resources held by the environment.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    /// Identifier of the environment, used to name checkpoints.
    fn id(&self) -> &str;

    /// Starts recording subsequent episodes to persistent media under `label`.
    fn record_video(&mut self, label: &str) -> Result<()> {
        Err(DqnError::Unsupported(format!(
            "{} cannot record episodes (requested label {:?})",
            self.id(),
            label
        ))
        .into())
    }
}

/// Owns an environment and guarantees that it is closed exactly once.
///
/// Call [`ScopedEnv::close`] to release the environment and observe the error.
/// If the guard is dropped instead, for example on an early return or while
/// unwinding, the environment is closed in [`Drop`] and a failure is logged.
pub struct ScopedEnv<E: Env> {
    env: Option<E>,
}

impl<E: Env> ScopedEnv<E> {
    /// Takes ownership of `env`.
    pub fn new(env: E) -> Self {
        Self { env: Some(env) }
    }

    /// Closes the environment.
    pub fn close(mut self) -> Result<()> {
        match self.env.take() {
            Some(mut env) => env.close(),
            None => Ok(()),
        }
    }
}

impl<E: Env> Deref for ScopedEnv<E> {
    type Target = E;

    fn deref(&self) -> &E {
        // `env` is only taken by `close()`, which consumes the guard
        self.env.as_ref().unwrap()
    }
}

impl<E: Env> DerefMut for ScopedEnv<E> {
    fn deref_mut(&mut self) -> &mut E {
        self.env.as_mut().unwrap()
    }
}

impl<E: Env> Drop for ScopedEnv<E> {
    fn drop(&mut self) {
        if let Some(mut env) = self.env.take() {
            if let Err(e) = env.close() {
                warn!("Failed to close environment {}: {:?}", env.id(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dummy::{DummyEnv, DummyEnvConfig};

    #[test]
    fn test_dropped_guard_closes_once() -> Result<()> {
        let config = DummyEnvConfig::new(3);
        let mut env = ScopedEnv::new(DummyEnv::build(&config, 0)?);
        env.reset()?;
        drop(env);
        assert_eq!(config.tracker.resets.get(), 1);
        assert_eq!(config.tracker.closes.get(), 1);
        Ok(())
    }

    #[test]
    fn test_explicit_close_is_not_repeated_on_drop() -> Result<()> {
        let config = DummyEnvConfig::new(3);
        let env = ScopedEnv::new(DummyEnv::build(&config, 0)?);
        env.close()?;
        assert_eq!(config.tracker.closes.get(), 1);
        Ok(())
    }

    #[test]
    fn test_guard_closes_while_unwinding() -> Result<()> {
        let config = DummyEnvConfig::new(3);
        let env = DummyEnv::build(&config, 0)?;
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _env = ScopedEnv::new(env);
            panic!("interrupted");
        }));
        assert!(result.is_err());
        assert_eq!(config.tracker.closes.get(), 1);
        Ok(())
    }
}
