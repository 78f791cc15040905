use super::TriangleAreaConfig;
use crate::{
    error::AgentError,
    mlp::{Mlp, MlpConfig},
    opt::Optimizer,
    util::{init_xavier_uniform, mse_loss},
    Activation,
};
use anyhow::Result;
use candle_core::{DType, Device, Tensor};
use candle_nn::{VarBuilder, VarMap};
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Three side lengths in.
const IN_DIM: usize = 3;

/// One area out.
const OUT_DIM: usize = 1;

/// Lower bound of the first two sides.
const MIN_SIDE: f64 = 0.1;

/// Area of a triangle with sides `a`, `b` and `c` by Heron's formula.
///
/// Degenerate triangles, including ones slightly violating the triangle
/// inequality through rounding, have area zero.
pub fn area(a: f64, b: f64, c: f64) -> f64 {
    let p = (a + b + c) / 2.0;
    (p * (p - a) * (p - b) * (p - c)).max(0.0).sqrt()
}

/// Triangle-area regression demo.
pub struct TriangleArea {
    config: TriangleAreaConfig,
    device: Device,
    mlp: Mlp,
    opt: Optimizer,
    rng: StdRng,
    sides: Option<Tensor>,
    areas: Option<Tensor>,
}

impl TriangleArea {
    /// Builds the network and the optimizer.
    ///
    /// Weights are Xavier-initialized from the configured seed and fitted by
    /// the optimizer of `config.opt_config`.
    pub fn build(config: TriangleAreaConfig) -> Result<Self> {
        config.validate()?;
        let device = config.device.to_candle()?;
        let varmap = VarMap::new();
        let vs = VarBuilder::from_varmap(&varmap, DType::F32, &device);
        let mlp_config = MlpConfig::uniform(
            IN_DIM,
            config.num_hidden_nodes,
            config.num_hidden_layers,
            OUT_DIM,
        )
        .activation(Activation::Tanh)
        .activation_out(Activation::Identity);
        let mlp = Mlp::build(vs, mlp_config)?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        init_xavier_uniform(&varmap, &mut rng)?;
        let opt = config.opt_config.build(varmap.all_vars())?;
        info!(
            "Built triangle area model: {} hidden layers of {} units, {:?}",
            config.num_hidden_layers, config.num_hidden_nodes, config.opt_config
        );

        Ok(Self {
            config,
            device,
            mlp,
            opt,
            rng,
            sides: None,
            areas: None,
        })
    }

    /// Replaces the training data with `batch_size` random triangles.
    ///
    /// Sides `a` and `b` are drawn from `[0.1, max_side + 1)` and `c` from
    /// `[|a - b|, a + b)`, so every triple is a valid triangle.
    pub fn generate_random_data(&mut self) -> Result<()> {
        let n = self.config.batch_size;
        let upper = self.config.max_side + 1.0;
        let mut sides = Vec::with_capacity(n * IN_DIM);
        let mut areas = Vec::with_capacity(n);

        for _ in 0..n {
            let a = self.rng.gen_range(MIN_SIDE..upper);
            let b = self.rng.gen_range(MIN_SIDE..upper);
            let c = self.rng.gen_range((a - b).abs()..a + b);
            sides.extend([a as f32, b as f32, c as f32]);
            areas.push(area(a, b, c) as f32);
        }

        self.sides = Some(Tensor::from_vec(sides, (n, IN_DIM), &self.device)?);
        self.areas = Some(Tensor::from_vec(areas, (n, OUT_DIM), &self.device)?);
        debug!("Generated {} triangles", n);
        Ok(())
    }

    fn data(&self) -> Result<(Tensor, Tensor)> {
        match (&self.sides, &self.areas) {
            (Some(sides), Some(areas)) => Ok((sides.clone(), areas.clone())),
            _ => Err(AgentError::NoData.into()),
        }
    }

    /// Squared loss of the current network on the current data.
    pub fn loss(&self) -> Result<f32> {
        let (sides, areas) = self.data()?;
        Ok(mse_loss(&self.mlp.forward(&sides)?, &areas)?.to_scalar::<f32>()?)
    }

    /// Runs `num_epochs` full-batch optimization steps and returns the final loss.
    pub fn train(&mut self) -> Result<f32> {
        let (sides, areas) = self.data()?;
        info!("Loss before training: {}", self.loss()?);

        for epoch in 0..self.config.num_epochs {
            let loss = mse_loss(&self.mlp.forward(&sides)?, &areas)?;
            self.opt.backward_step(&loss)?;
            if (epoch + 1) % 100 == 0 {
                debug!("Epoch {}: loss = {}", epoch + 1, loss.to_scalar::<f32>()?);
            }
        }

        let loss = self.loss()?;
        info!("Loss after training: {}", loss);
        Ok(loss)
    }

    /// Predicts the area of a triangle with sides `a`, `b` and `c`.
    pub fn eval(&self, a: f32, b: f32, c: f32) -> Result<f32> {
        let xs = Tensor::from_vec(vec![a, b, c], (1, IN_DIM), &self.device)?;
        let ys = self.mlp.forward(&xs)?.flatten_all()?.to_vec1::<f32>()?;
        Ok(ys[0])
    }

    /// Predicts the areas of the current data, shape `(batch_size, 1)`.
    pub fn eval_data(&self) -> Result<Tensor> {
        let (sides, _) = self.data()?;
        self.mlp.forward(&sides)
    }

    /// Side lengths of the current data, shape `(batch_size, 3)`.
    pub fn sides(&self) -> Option<&Tensor> {
        self.sides.as_ref()
    }

    /// Target areas of the current data, shape `(batch_size, 1)`.
    pub fn areas(&self) -> Option<&Tensor> {
        self.areas.as_ref()
    }
}
