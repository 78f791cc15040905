//! Supervised demo: predicting the area of a triangle from its side lengths.
//!
//! Random valid triangles are drawn, labelled with Heron's formula and fed to
//! an MLP with tanh hidden layers and a linear output trained on squared
//! loss with Adam.
//!
//! ```no_run
//! use rodney_candle_agent::triangle_area::{TriangleArea, TriangleAreaConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = TriangleAreaConfig::default().batch_size(256).num_epochs(100);
//! let mut demo = TriangleArea::build(config)?;
//! demo.generate_random_data()?;
//! let loss = demo.train()?;
//! println!("loss = {}, area(3, 4, 5) ~ {}", loss, demo.eval(3.0, 4.0, 5.0)?);
//! # Ok(())
//! # }
//! ```
mod base;
mod config;
pub use base::{area, TriangleArea};
pub use config::TriangleAreaConfig;
