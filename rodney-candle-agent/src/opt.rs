//! Optimizers.
use anyhow::Result;
use candle_core::{Tensor, Var};
use candle_nn::{AdamW, Optimizer as _, ParamsAdamW};
use candle_optimisers::adam::{Adam, ParamsAdam};
use serde::{Deserialize, Serialize};

/// Optimizer used to fit a network.
///
/// Moment decay rates and epsilon are the defaults of the underlying
/// implementations; only the learning rate and, for AdamW, the weight decay
/// are configurable.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub enum OptimizerConfig {
    /// Adam from `candle-optimisers`.
    Adam {
        /// Learning rate.
        lr: f64,
    },

    /// AdamW from `candle-nn`.
    AdamW {
        /// Learning rate.
        lr: f64,

        /// Decoupled weight decay.
        #[serde(default = "default_weight_decay")]
        weight_decay: f64,
    },
}

fn default_weight_decay() -> f64 {
    ParamsAdamW::default().weight_decay
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self::Adam { lr: 0.01 }
    }
}

impl OptimizerConfig {
    /// AdamW with the default weight decay.
    pub fn adamw(lr: f64) -> Self {
        Self::AdamW {
            lr,
            weight_decay: default_weight_decay(),
        }
    }

    /// Returns the learning rate.
    pub fn lr(&self) -> f64 {
        match self {
            Self::Adam { lr } | Self::AdamW { lr, .. } => *lr,
        }
    }

    /// Replaces the learning rate, keeping the other parameters.
    pub fn learning_rate(mut self, v: f64) -> Self {
        match &mut self {
            Self::Adam { lr } | Self::AdamW { lr, .. } => *lr = v,
        }
        self
    }

    /// Creates an optimizer updating `vars`.
    pub fn build(&self, vars: Vec<Var>) -> Result<Optimizer> {
        let opt = match *self {
            Self::Adam { lr } => Optimizer::Adam(Adam::new(
                vars,
                ParamsAdam {
                    lr,
                    ..ParamsAdam::default()
                },
            )?),
            Self::AdamW { lr, weight_decay } => Optimizer::AdamW(AdamW::new(
                vars,
                ParamsAdamW {
                    lr,
                    weight_decay,
                    ..ParamsAdamW::default()
                },
            )?),
        };
        Ok(opt)
    }
}

/// An optimizer built from [`OptimizerConfig`].
pub enum Optimizer {
    /// Adam.
    Adam(Adam),

    /// AdamW.
    AdamW(AdamW),
}

impl Optimizer {
    /// Computes gradients of `loss` and updates the variables once.
    pub fn backward_step(&mut self, loss: &Tensor) -> Result<()> {
        match self {
            Self::Adam(opt) => opt.backward_step(loss)?,
            Self::AdamW(opt) => opt.backward_step(loss)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use candle_core::Device;

    fn minimize_square(config: OptimizerConfig) -> Result<f32> {
        let x = Var::from_tensor(&Tensor::new(&[3f32], &Device::Cpu)?)?;
        let mut opt = config.build(vec![x.clone()])?;
        for _ in 0..200 {
            let loss = x.as_tensor().sqr()?.sum_all()?;
            opt.backward_step(&loss)?;
        }
        Ok(x.as_tensor().to_vec1::<f32>()?[0])
    }

    #[test]
    fn test_learning_rate() {
        let config = OptimizerConfig::default().learning_rate(0.5);
        assert_eq!(config, OptimizerConfig::Adam { lr: 0.5 });
        assert_eq!(config.lr(), 0.5);

        let config = OptimizerConfig::AdamW {
            lr: 0.1,
            weight_decay: 0.2,
        }
        .learning_rate(0.01);
        assert_eq!(
            config,
            OptimizerConfig::AdamW {
                lr: 0.01,
                weight_decay: 0.2
            }
        );
    }

    #[test]
    fn test_adam_minimizes_square() -> Result<()> {
        assert!(minimize_square(OptimizerConfig::Adam { lr: 0.1 })?.abs() < 0.5);
        Ok(())
    }

    #[test]
    fn test_adamw_minimizes_square() -> Result<()> {
        assert!(minimize_square(OptimizerConfig::adamw(0.1))?.abs() < 0.5);
        Ok(())
    }

    #[test]
    fn test_weight_decay_defaults() -> Result<()> {
        let config: OptimizerConfig = serde_yaml::from_str("AdamW:\n  lr: 0.01\n")?;
        assert_eq!(config, OptimizerConfig::adamw(0.01));

        let config: OptimizerConfig = serde_yaml::from_str("Adam:\n  lr: 0.02\n")?;
        assert_eq!(config, OptimizerConfig::Adam { lr: 0.02 });
        Ok(())
    }
}
