use crate::{error::AgentError, Activation};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
/// Configuration of [`Mlp`](super::Mlp).
pub struct MlpConfig {
    pub(super) in_dim: usize,
    pub(super) units: Vec<usize>,
    pub(super) out_dim: usize,
    pub(super) activation: Activation,
    pub(super) activation_out: Activation,
}

impl MlpConfig {
    /// Creates configuration of MLP with ReLU hidden layers.
    ///
    /// * `units` - Number of units of each hidden layer.
    /// * `activation_out` - Activation applied on the output layer.
    pub fn new(in_dim: usize, units: Vec<usize>, out_dim: usize, activation_out: Activation) -> Self {
        Self {
            in_dim,
            units,
            out_dim,
            activation: Activation::ReLU,
            activation_out,
        }
    }

    /// Creates configuration of MLP with `hidden_num` hidden layers of `hidden_size` units.
    ///
    /// Every layer, the output one included, is followed by ReLU.
    pub fn uniform(in_dim: usize, hidden_size: usize, hidden_num: usize, out_dim: usize) -> Self {
        Self::new(
            in_dim,
            vec![hidden_size; hidden_num],
            out_dim,
            Activation::ReLU,
        )
    }

    /// Sets the activation of hidden layers.
    pub fn activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    /// Sets the activation of the output layer.
    pub fn activation_out(mut self, activation_out: Activation) -> Self {
        self.activation_out = activation_out;
        self
    }

    /// Input dimension.
    pub fn in_dim(&self) -> usize {
        self.in_dim
    }

    /// Output dimension.
    pub fn out_dim(&self) -> usize {
        self.out_dim
    }

    /// Returns `(in_dim, out_dim)` of every linear layer, input layer first.
    pub(super) fn in_out_pairs(&self) -> Vec<(usize, usize)> {
        let mut dims = Vec::with_capacity(self.units.len() + 2);
        dims.push(self.in_dim);
        dims.extend_from_slice(&self.units);
        dims.push(self.out_dim);
        dims.windows(2).map(|w| (w[0], w[1])).collect()
    }

    /// Checks that the configuration describes a buildable network.
    pub fn validate(&self) -> Result<()> {
        if self.units.is_empty() {
            return Err(AgentError::InvalidConfig("MLP needs at least one hidden layer".into()).into());
        }
        if self.in_dim == 0 || self.out_dim == 0 || self.units.contains(&0) {
            return Err(AgentError::InvalidConfig(format!(
                "zero dimension in MLP: in_dim={}, units={:?}, out_dim={}",
                self.in_dim, self.units, self.out_dim
            ))
            .into());
        }
        Ok(())
    }

    /// Constructs [`MlpConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`MlpConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
