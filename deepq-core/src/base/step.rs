//! Environment step.
use super::Env;

/// Additional information to `Obs` and `Act`.
///
/// The value is forwarded as-is; the control loops never inspect it.
pub trait Info {}

impl Info for () {}

/// Represents the outcome of an environment step `(o_t+1, r_t)`
/// with some additional information.
pub struct Step<E: Env> {
    /// Observation after the step.
    pub obs: E::Obs,

    /// Reward.
    pub reward: f32,

    /// Flag denoting if episode is terminated.
    pub is_terminated: bool,

    /// Flag denoting if episode is truncated, e.g. by a time limit.
    pub is_truncated: bool,

    /// Information defined by user.
    pub info: E::Info,
}

impl<E: Env> Step<E> {
    /// Constructs a [`Step`] object.
    pub fn new(
        obs: E::Obs,
        reward: f32,
        is_terminated: bool,
        is_truncated: bool,
        info: E::Info,
    ) -> Self {
        Step {
            obs,
            reward,
            is_terminated,
            is_truncated,
            info,
        }
    }

    #[inline]
    /// Terminated or truncated.
    pub fn is_done(&self) -> bool {
        self.is_terminated || self.is_truncated
    }
}

/// A transition `(o_t, a_t, r_t, o_t+1, terminated_t)` pushed into a replay buffer.
///
/// Transitions are immutable once pushed.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition<O, A> {
    /// Observation before the step.
    pub obs: O,

    /// Action taken.
    pub act: A,

    /// Reward.
    pub reward: f32,

    /// Observation after the step.
    pub next_obs: O,

    /// Whether `next_obs` is terminal. Truncated steps keep `false` so that
    /// the value of `next_obs` is still bootstrapped.
    pub is_terminated: bool,
}

impl<O, A> Transition<O, A> {
    /// Constructs a [`Transition`].
    pub fn new(obs: O, act: A, reward: f32, next_obs: O, is_terminated: bool) -> Self {
        Self {
            obs,
            act,
            reward,
            next_obs,
            is_terminated,
        }
    }
}
