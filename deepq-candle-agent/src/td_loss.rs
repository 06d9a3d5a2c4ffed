//! One-step temporal-difference loss.
//!
//! Given the action-values `q_old` of the current observations and `q_new`
//! of the next observations, the loss is the mean squared error between
//! `q_old[i, a_i]` and the target
//!
//! ```text
//! r_i + gamma * max_a q_new[i, a] * (1 - done_i)
//! ```
//!
//! The target is detached from the graph, so gradients only flow through the
//! action-values of the taken actions.
use anyhow::Result;
use candle_core::{shape::D, DType, Tensor};
use candle_nn::loss::mse;
use deepq_core::LossValue;

/// Loss produced by [`Dqn`](crate::dqn::Dqn), a scalar tensor attached to the graph.
#[derive(Debug, Clone)]
pub struct TdLoss(pub Tensor);

impl TdLoss {
    /// Returns the underlying tensor.
    pub fn tensor(&self) -> &Tensor {
        &self.0
    }
}

impl LossValue for TdLoss {
    fn value(&self) -> Result<f32> {
        Ok(self.0.to_dtype(DType::F32)?.to_scalar::<f32>()?)
    }
}

/// Returns the bootstrap target `reward + gamma * max_next_q * (1 - is_done)`.
///
/// All arguments have shape `[batch_size]`; `is_done` holds `0.0` or `1.0`.
/// The returned tensor does not track gradients.
pub fn td_target(reward: &Tensor, max_next_q: &Tensor, is_done: &Tensor, gamma: f64) -> Result<Tensor> {
    let is_not_done = is_done.affine(-1.0, 1.0)?;
    let bootstrap = (max_next_q.detach() * is_not_done)?.affine(gamma, 0.0)?;
    Ok((reward + bootstrap)?.detach())
}

/// Builds the temporal-difference loss.
///
/// * `q_old` - action-values of the observations, `[batch_size, n_actions]`.
/// * `q_new` - action-values of the next observations, `[batch_size, n_actions]`.
/// * `act` - indices of the taken actions, `[batch_size]`, integer dtype.
/// * `reward`, `is_done` - `[batch_size]`, `f32`.
pub fn td_loss(
    q_old: &Tensor,
    q_new: &Tensor,
    act: &Tensor,
    reward: &Tensor,
    is_done: &Tensor,
    gamma: f64,
) -> Result<Tensor> {
    let pred = q_old.gather(&act.unsqueeze(D::Minus1)?, D::Minus1)?.squeeze(D::Minus1)?;
    let max_next_q = q_new.max(D::Minus1)?;
    let tgt = td_target(reward, &max_next_q, is_done, gamma)?;
    Ok(mse(&pred, &tgt)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::{Device, Var};

    fn tensors(done: f32) -> Result<(Tensor, Tensor, Tensor, Tensor, Tensor)> {
        let device = Device::Cpu;
        let q_old = Tensor::new(&[[1.0f32, 2.0]], &device)?;
        let q_new = Tensor::new(&[[5.0f32, 3.0]], &device)?;
        let act = Tensor::new(&[0i64], &device)?;
        let reward = Tensor::new(&[1.0f32], &device)?;
        let is_done = Tensor::new(&[done], &device)?;
        Ok((q_old, q_new, act, reward, is_done))
    }

    #[test]
    fn test_terminal_transition_has_no_bootstrap() -> Result<()> {
        let (q_old, q_new, act, reward, is_done) = tensors(1.0)?;
        let loss = td_loss(&q_old, &q_new, &act, &reward, &is_done, 0.99)?;
        assert_eq!(TdLoss(loss).value()?, 0.0);
        Ok(())
    }

    #[test]
    fn test_non_terminal_transition() -> Result<()> {
        let (q_old, q_new, act, reward, is_done) = tensors(0.0)?;
        let loss = td_loss(&q_old, &q_new, &act, &reward, &is_done, 0.99)?;
        let loss = TdLoss(loss).value()?;
        assert!((loss - 24.5025).abs() < 1e-4, "loss = {}", loss);
        Ok(())
    }

    #[test]
    fn test_td_target() -> Result<()> {
        let device = Device::Cpu;
        let reward = Tensor::new(&[1.0f32, -1.0, 0.5], &device)?;
        let max_next_q = Tensor::new(&[2.0f32, 4.0, 8.0], &device)?;
        let is_done = Tensor::new(&[0.0f32, 1.0, 0.0], &device)?;
        let tgt = td_target(&reward, &max_next_q, &is_done, 0.5)?.to_vec1::<f32>()?;
        assert_eq!(tgt, vec![2.0, -1.0, 4.5]);
        Ok(())
    }

    #[test]
    fn test_gather_selects_taken_actions() -> Result<()> {
        let device = Device::Cpu;
        let q_old = Tensor::new(&[[1.0f32, 3.0], [2.0, 7.0]], &device)?;
        let q_new = Tensor::zeros((2, 2), DType::F32, &device)?;
        let act = Tensor::new(&[1i64, 0], &device)?;
        let reward = Tensor::new(&[3.0f32, 2.0], &device)?;
        let is_done = Tensor::new(&[0.0f32, 0.0], &device)?;

        // Both predictions equal their targets.
        let loss = td_loss(&q_old, &q_new, &act, &reward, &is_done, 0.9)?;
        assert_eq!(TdLoss(loss).value()?, 0.0);
        Ok(())
    }

    #[test]
    fn test_no_gradient_through_target() -> Result<()> {
        let device = Device::Cpu;
        let w = Var::new(&[1.0f32, 0.0], &device)?;
        let q = w.as_tensor().unsqueeze(0)?;
        let act = Tensor::new(&[0i64], &device)?;
        let reward = Tensor::new(&[0.0f32], &device)?;
        let is_done = Tensor::new(&[0.0f32], &device)?;

        // target = 0.5 * max(w) = 0.5, loss = (w0 - 0.5)^2
        let loss = td_loss(&q, &q, &act, &reward, &is_done, 0.5)?;
        assert!((TdLoss(loss.clone()).value()? - 0.25).abs() < 1e-6);

        let grads = loss.backward()?;
        let grad = grads
            .get(w.as_tensor())
            .expect("gradient of w")
            .to_vec1::<f32>()?;
        assert!((grad[0] - 1.0).abs() < 1e-6, "grad = {:?}", grad);
        assert_eq!(grad[1], 0.0);
        Ok(())
    }
}
