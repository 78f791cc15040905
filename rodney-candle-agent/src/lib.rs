//! Networks and demos implemented with [candle](https://crates.io/crates/candle-core).
pub mod error;
pub mod mlp;
pub mod opt;
pub mod triangle_area;
pub mod util;
use anyhow::Result;
use candle_core::Tensor;
pub use error::AgentError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Copy, Deserialize, Serialize, PartialEq)]
/// Device for using candle.
///
/// This enum is added because [`candle_core::Device`] does not support serialization.
pub enum Device {
    /// The main CPU device.
    Cpu,

    /// The GPU device with the given ordinal.
    Cuda(usize),
}

impl Device {
    /// Returns the corresponding candle device.
    ///
    /// Fails if the CUDA device is not available.
    pub fn to_candle(self) -> Result<candle_core::Device> {
        match self {
            Self::Cpu => Ok(candle_core::Device::Cpu),
            Self::Cuda(n) => Ok(candle_core::Device::new_cuda(n)?),
        }
    }
}

impl Default for Device {
    fn default() -> Self {
        Self::Cpu
    }
}

/// Activation functions.
#[derive(Clone, Debug, Copy, Deserialize, Serialize, PartialEq)]
pub enum Activation {
    /// Rectified linear unit.
    ReLU,

    /// Hyperbolic tangent.
    Tanh,

    /// No activation.
    Identity,
}

impl Activation {
    /// Applies the activation element-wise.
    pub fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        Ok(match self {
            Self::ReLU => xs.relu()?,
            Self::Tanh => xs.tanh()?,
            Self::Identity => xs.clone(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_activation() -> Result<()> {
        let xs = Tensor::new(&[-1f32, 0.0, 2.0], &candle_core::Device::Cpu)?;

        let ys = Activation::ReLU.forward(&xs)?.to_vec1::<f32>()?;
        assert_eq!(ys, vec![0.0, 0.0, 2.0]);

        let ys = Activation::Identity.forward(&xs)?.to_vec1::<f32>()?;
        assert_eq!(ys, vec![-1.0, 0.0, 2.0]);

        let ys = Activation::Tanh.forward(&xs)?.to_vec1::<f32>()?;
        assert!((ys[0] + 0.7615942).abs() < 1e-5);
        assert_eq!(ys[1], 0.0);
        Ok(())
    }

    #[test]
    fn test_device_serde() -> Result<()> {
        let s = serde_yaml::to_string(&Device::Cuda(1))?;
        let d: Device = serde_yaml::from_str(&s)?;
        assert_eq!(d, Device::Cuda(1));
        assert!(matches!(Device::Cpu.to_candle()?, candle_core::Device::Cpu));
        Ok(())
    }
}
