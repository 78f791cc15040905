use super::{mlp_forward, MlpConfig};
use crate::error::AgentError;
use anyhow::Result;
use candle_core::{Device, Tensor};
use candle_nn::{linear, Linear, VarBuilder};
use log::debug;

/// Returns vector of linear modules from [`MlpConfig`].
fn create_linear_layers(prefix: &str, vs: VarBuilder, config: &MlpConfig) -> Result<Vec<Linear>> {
    let vs = vs.pp(prefix);

    config
        .in_out_pairs()
        .iter()
        .enumerate()
        .map(|(i, &(in_dim, out_dim))| Ok(linear(in_dim, out_dim, vs.pp(format!("ln{}", i)))?))
        .collect()
}

/// Multilayer perceptron.
///
/// Variables are named `mlp.ln{i}.weight` and `mlp.ln{i}.bias` in the
/// [`VarBuilder`] the network is built with.
pub struct Mlp {
    config: MlpConfig,
    device: Device,
    layers: Vec<Linear>,
}

impl Mlp {
    /// Builds the network, registering its variables in `vs`.
    pub fn build(vs: VarBuilder, config: MlpConfig) -> Result<Self> {
        config.validate()?;
        let device = vs.device().clone();
        let layers = create_linear_layers("mlp", vs, &config)?;
        debug!("Built MLP with layers {:?}", config.in_out_pairs());

        Ok(Self {
            config,
            device,
            layers,
        })
    }

    /// Forward pass.
    ///
    /// `xs` must have shape `(batch_size, in_dim)`; the output has shape
    /// `(batch_size, out_dim)`.
    pub fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        match xs.dims() {
            &[_, n] if n == self.config.in_dim => {}
            dims => {
                return Err(AgentError::DimensionMismatch {
                    expected: self.config.in_dim,
                    actual: dims.to_vec(),
                }
                .into())
            }
        }
        let xs = xs.to_device(&self.device)?;
        mlp_forward(
            xs,
            &self.layers,
            &self.config.activation,
            &self.config.activation_out,
        )
    }

    /// Configuration of the network.
    pub fn config(&self) -> &MlpConfig {
        &self.config
    }
}
