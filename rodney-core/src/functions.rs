//! Loss and action-probability helpers on plain values.
//!
//! These work on `f32` slices and [`Transition`]s so they can be used without
//! a tensor backend. Tensor versions live in the backend crates.
use crate::{error::RodneyError, Transition};
use anyhow::Result;

/// Huber function with threshold 1.
///
/// `delta^2 / 2` for `|delta| <= 1` and `|delta| - 1/2` elsewhere.
pub fn huber(delta: f32) -> f32 {
    let d = delta.abs();
    if d <= 1.0 {
        0.5 * d * d
    } else {
        d - 0.5
    }
}

/// Mean of [`huber`] applied to the rewards of a batch.
///
/// Fails with [`RodneyError::EmptyBatch`] when `batch` is empty.
pub fn huber_loss<S, A>(batch: &[Transition<S, A>]) -> Result<f32> {
    if batch.is_empty() {
        return Err(RodneyError::EmptyBatch.into());
    }
    let sum: f32 = batch.iter().map(|tr| huber(tr.reward())).sum();
    Ok(sum / batch.len() as f32)
}

/// Boltzmann probabilities of actions, `exp(q_i / tau) / sum_j exp(q_j / tau)`.
///
/// The maximum action value is subtracted before exponentiation, which leaves
/// the result unchanged and keeps it finite for large `q / tau`.
pub fn action_probs(q_values: &[f32], tau: f32) -> Result<Vec<f32>> {
    if !(tau > 0.0 && tau.is_finite()) {
        return Err(RodneyError::IllegalTemperature(tau).into());
    }
    if q_values.is_empty() {
        return Err(RodneyError::EmptyValues.into());
    }

    let q_max = q_values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps = q_values
        .iter()
        .map(|q| ((q - q_max) / tau).exp())
        .collect::<Vec<_>>();
    let sum: f32 = exps.iter().sum();

    Ok(exps.into_iter().map(|e| e / sum).collect())
}
