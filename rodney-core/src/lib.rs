#![warn(missing_docs)]
//! Core components of Rodney, a small reinforcement learning sandbox.
//!
//! The central piece is [`ReplayMemory`], a fixed-capacity circular buffer of
//! experiences that supports sampling of distinct elements without
//! replacement. [`Transition`] is the usual element type and the helpers in
//! [`functions`] compute losses and action probabilities over them.
//!
//! ```rust
//! use rodney_core::{ReplayMemory, Transition};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut memory = ReplayMemory::with_seed(125, 42)?;
//! for i in 0..125 {
//!     memory.push(Transition::new(i, i, i + 1, i as f32 * 0.01));
//! }
//! let batch = memory.sample(3)?;
//! let loss = rodney_core::functions::huber_loss(&batch)?;
//! assert!(loss >= 0.0);
//! # Ok(())
//! # }
//! ```
pub mod error;
pub mod functions;
pub mod replay_memory;

mod base;
pub use base::{ExperienceBufferBase, ReplayBufferBase};

mod transition;
pub use error::RodneyError;
pub use replay_memory::{ReplayMemory, ReplayMemoryConfig};
pub use transition::Transition;
