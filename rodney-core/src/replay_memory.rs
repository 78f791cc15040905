//! Fixed-capacity replay memory.
//!
//! [`ReplayMemory`] stores up to `capacity` elements. Once it is full, each
//! push overwrites the slot under the write cursor and advances the cursor
//! modulo `capacity`, so eviction follows the cursor and not access recency.
//! Sampling draws distinct elements uniformly at random from the currently
//! stored ones.
//!
//! # Examples
//!
//! ```rust
//! use rodney_core::{ReplayMemory, ReplayMemoryConfig, ReplayBufferBase};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ReplayMemoryConfig::default().capacity(3).seed(Some(42));
//! let mut memory = ReplayMemory::<char>::build(&config)?;
//!
//! for c in ['A', 'B', 'C', 'D'] {
//!     memory.push(c);
//! }
//! assert_eq!(memory.len(), 3);
//! assert_eq!(memory.iter().copied().collect::<Vec<_>>(), vec!['D', 'B', 'C']);
//!
//! let batch = memory.sample(2)?;
//! assert_eq!(batch.len(), 2);
//! # Ok(())
//! # }
//! ```
mod base;
mod config;
pub use base::ReplayMemory;
pub use config::ReplayMemoryConfig;
