//! Configuration of [`TriangleArea`](super::TriangleArea).
use crate::{error::AgentError, opt::OptimizerConfig, Device};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`TriangleArea`](super::TriangleArea).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TriangleAreaConfig {
    /// Seed for weight initialization and data generation.
    pub seed: u64,

    /// Optimizer fitting the network.
    #[serde(default)]
    pub opt_config: OptimizerConfig,

    /// Number of triangles generated by each call of `generate_random_data()`.
    pub batch_size: usize,

    /// Number of full-batch optimization steps per call of `train()`.
    pub num_epochs: usize,

    /// Number of hidden layers.
    pub num_hidden_layers: usize,

    /// Number of units of each hidden layer.
    pub num_hidden_nodes: usize,

    /// The first two sides are drawn from `[0.1, max_side + 1)`.
    pub max_side: f64,

    /// Device on which the network runs.
    #[serde(default)]
    pub device: Device,
}

impl Default for TriangleAreaConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            opt_config: OptimizerConfig::Adam { lr: 0.01 },
            batch_size: 1000,
            num_epochs: 1000,
            num_hidden_layers: 2,
            num_hidden_nodes: 10,
            max_side: 10.0,
            device: Device::Cpu,
        }
    }
}

impl TriangleAreaConfig {
    /// Sets the random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Sets the optimizer.
    pub fn opt_config(mut self, v: OptimizerConfig) -> Self {
        self.opt_config = v;
        self
    }

    /// Sets the learning rate of the configured optimizer.
    pub fn learning_rate(mut self, v: f64) -> Self {
        self.opt_config = self.opt_config.learning_rate(v);
        self
    }

    /// Sets the number of generated triangles.
    pub fn batch_size(mut self, v: usize) -> Self {
        self.batch_size = v;
        self
    }

    /// Sets the number of optimization steps per training call.
    pub fn num_epochs(mut self, v: usize) -> Self {
        self.num_epochs = v;
        self
    }

    /// Sets the number of hidden layers.
    pub fn num_hidden_layers(mut self, v: usize) -> Self {
        self.num_hidden_layers = v;
        self
    }

    /// Sets the number of units of each hidden layer.
    pub fn num_hidden_nodes(mut self, v: usize) -> Self {
        self.num_hidden_nodes = v;
        self
    }

    /// Sets the bound of the first two sides.
    pub fn max_side(mut self, v: f64) -> Self {
        self.max_side = v;
        self
    }

    /// Sets the device.
    pub fn device(mut self, v: Device) -> Self {
        self.device = v;
        self
    }

    /// Checks the parameters that the network does not check itself.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(AgentError::InvalidConfig("batch_size must be positive".into()).into());
        }
        if !(self.max_side > 0.0 && self.max_side.is_finite()) {
            return Err(AgentError::InvalidConfig(format!(
                "max_side must be positive, got {}",
                self.max_side
            ))
            .into());
        }
        let lr = self.opt_config.lr();
        if !(lr > 0.0) {
            return Err(AgentError::InvalidConfig(format!(
                "learning rate must be positive, got {}",
                lr
            ))
            .into());
        }
        if let OptimizerConfig::AdamW { weight_decay, .. } = self.opt_config {
            if !(weight_decay >= 0.0) {
                return Err(AgentError::InvalidConfig(format!(
                    "weight_decay must be non-negative, got {}",
                    weight_decay
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Constructs [`TriangleAreaConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TriangleAreaConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_serde_triangle_area_config() -> Result<()> {
        let config = TriangleAreaConfig::default()
            .seed(1)
            .batch_size(64)
            .num_epochs(10)
            .num_hidden_layers(3)
            .num_hidden_nodes(16)
            .opt_config(OptimizerConfig::adamw(0.005));

        let dir = TempDir::new("triangle_area_config")?;
        let path = dir.path().join("triangle_area.yaml");
        config.save(&path)?;
        assert_eq!(config, TriangleAreaConfig::load(&path)?);
        Ok(())
    }

    #[test]
    fn test_validate() {
        assert!(TriangleAreaConfig::default().validate().is_ok());
        assert!(TriangleAreaConfig::default().batch_size(0).validate().is_err());
        assert!(TriangleAreaConfig::default().max_side(0.0).validate().is_err());
        assert!(TriangleAreaConfig::default().learning_rate(0.0).validate().is_err());

        let adamw = TriangleAreaConfig::default().opt_config(OptimizerConfig::AdamW {
            lr: 0.01,
            weight_decay: -1.0,
        });
        assert!(adamw.validate().is_err());
    }

    #[test]
    fn test_learning_rate_keeps_optimizer() {
        let config = TriangleAreaConfig::default()
            .opt_config(OptimizerConfig::adamw(0.1))
            .learning_rate(0.02);
        assert_eq!(config.opt_config, OptimizerConfig::adamw(0.02));
    }

    #[test]
    fn test_optimizer_defaults_to_adam() -> Result<()> {
        let dir = TempDir::new("triangle_area_config")?;
        let path = dir.path().join("triangle_area.yaml");
        std::fs::write(
            &path,
            "seed: 1\nbatch_size: 8\nnum_epochs: 2\nnum_hidden_layers: 1\n\
             num_hidden_nodes: 4\nmax_side: 5.0\n",
        )?;
        let config = TriangleAreaConfig::load(&path)?;
        assert_eq!(config.opt_config, OptimizerConfig::Adam { lr: 0.01 });
        Ok(())
    }
}
