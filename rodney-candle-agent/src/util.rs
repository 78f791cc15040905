//! Utilities.
use anyhow::{anyhow, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::VarMap;
use log::trace;
use rand::Rng;
use rodney_core::Transition;

/// Smooth L1 (Huber) loss averaged over all elements.
///
/// See <https://pytorch.org/docs/stable/generated/torch.nn.SmoothL1Loss.html>.
pub fn smooth_l1_loss(x: &Tensor, y: &Tensor) -> Result<Tensor, candle_core::Error> {
    let device = x.device();
    let d = (x - y)?.abs()?;
    let m1 = d.lt(1.0)?.to_dtype(DType::F32)?.to_device(device)?;
    let m2 = Tensor::try_from(1f32)?
        .to_device(device)?
        .broadcast_sub(&m1)?;
    (((0.5 * m1)? * d.powf(2.0))? + m2 * (d - 0.5))?.mean_all()
}

/// Mean squared error averaged over all elements.
pub fn mse_loss(x: &Tensor, y: &Tensor) -> Result<Tensor, candle_core::Error> {
    (x - y)?.sqr()?.mean_all()
}

/// Returns the rewards of a batch of transitions as a 1-D tensor.
pub fn reward<S, A>(batch: &[Transition<S, A>], device: &Device) -> Result<Tensor> {
    let reward = batch.iter().map(|tr| tr.reward()).collect::<Vec<_>>();
    Ok(Tensor::from_slice(&reward[..], (batch.len(),), device)?)
}

/// Overwrites the variables of `varmap` with Xavier-uniform weights and zero biases.
///
/// Variables are visited in name order so that the result only depends on
/// the state of `rng`. Variables whose name ends with `bias` are zeroed; the
/// others must be 2-D `(out_dim, in_dim)` weights.
pub fn init_xavier_uniform(varmap: &VarMap, rng: &mut impl Rng) -> Result<()> {
    let data = varmap
        .data()
        .lock()
        .map_err(|_| anyhow!("Variable map is poisoned"))?;
    let mut names = data.keys().cloned().collect::<Vec<_>>();
    names.sort();

    for name in names {
        let var = &data[&name];
        let t = var.as_tensor();
        let init = if name.ends_with("bias") {
            t.zeros_like()?
        } else {
            let (out_dim, in_dim) = t.dims2()?;
            let limit = (6.0 / (in_dim + out_dim) as f32).sqrt();
            let w = (0..out_dim * in_dim)
                .map(|_| rng.gen_range(-limit..limit))
                .collect::<Vec<f32>>();
            Tensor::from_vec(w, (out_dim, in_dim), t.device())?.to_dtype(t.dtype())?
        };
        trace!("Initialized {}", name);
        var.set(&init)?;
    }

    Ok(())
}
