#![warn(missing_docs)]
//! Rodney is a small reinforcement learning sandbox. It consists of the crates below:
//!
//! * [rodney-core](rodney_core) provides [ReplayMemory](rodney_core::ReplayMemory), a
//!   fixed-capacity circular buffer of experiences with distinct random sampling,
//!   [Transition](rodney_core::Transition) and plain-value helpers such as the Huber loss
//!   and Boltzmann action probabilities in [functions](rodney_core::functions).
//! * [rodney-candle-agent](rodney_candle_agent) (feature `candle`, on by default) wraps
//!   [candle](https://crates.io/crates/candle-core) to build multilayer perceptrons and
//!   runs the triangle-area regression demo.
//!
//! Runnable programs are in the `examples` directory of this crate:
//!
//! ```bash
//! cargo run --example replay_memory -- --capacity 125 --batch-size 3
//! cargo run --release --example triangle_area -- --rounds 10
//! ```
pub use rodney_core as core;

#[cfg(feature = "candle")]
pub use rodney_candle_agent as candle_agent;
