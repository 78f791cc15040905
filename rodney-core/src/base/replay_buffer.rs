//! Replay buffer interface for reinforcement learning.
//!
//! Replay buffers store experiences observed while interacting with an
//! environment and hand out batches of them for training, which breaks the
//! temporal correlation between consecutive experiences.

use anyhow::Result;

/// Interface for buffers that store experiences.
///
/// # Examples
///
/// ```ignore
/// struct SimpleBuffer<T> {
///     items: Vec<T>,
/// }
///
/// impl<T> ExperienceBufferBase for SimpleBuffer<T> {
///     type Item = T;
///
///     fn push(&mut self, tr: T) {
///         self.items.push(tr);
///     }
///
///     fn len(&self) -> usize {
///         self.items.len()
///     }
/// }
/// ```
pub trait ExperienceBufferBase {
    /// The type of items stored in the buffer.
    type Item;

    /// Pushes a new experience into the buffer.
    ///
    /// Pushing never fails; a bounded buffer evicts an older item instead.
    fn push(&mut self, tr: Self::Item);

    /// Returns the current number of experiences in the buffer.
    fn len(&self) -> usize;

    /// Returns `true` if the buffer holds no experience.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Interface for replay buffers that generate batches for training.
pub trait ReplayBufferBase: Sized {
    /// Configuration parameters for the replay buffer.
    type Config: Clone;

    /// The type of batch generated for training.
    type Batch;

    /// Builds a new replay buffer from the given configuration.
    ///
    /// Fails if the configuration describes an unusable buffer.
    fn build(config: &Self::Config) -> Result<Self>;

    /// Samples a batch of `size` experiences for training.
    fn batch(&mut self, size: usize) -> Result<Self::Batch>;
}
