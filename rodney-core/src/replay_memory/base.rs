//! Circular replay memory with distinct sampling.
use super::ReplayMemoryConfig;
use crate::{error::RodneyError, ExperienceBufferBase, ReplayBufferBase};
use anyhow::Result;
use log::{debug, trace};
use rand::{rngs::StdRng, seq::index, SeedableRng};
use std::slice::Iter;

/// A fixed-capacity circular buffer of experiences.
///
/// Elements are appended until `capacity` is reached. After that, every push
/// overwrites the slot at the write cursor. The cursor advances by one modulo
/// `capacity` on every push, full or not.
///
/// # Type Parameters
///
/// * `T` - The type of stored experiences, typically a [`Transition`](crate::Transition)
pub struct ReplayMemory<T> {
    /// Maximum number of stored elements.
    capacity: usize,

    /// Slot written by the next push, in `[0, capacity)`.
    position: usize,

    /// Stored elements. `items.len()` is the current size.
    items: Vec<T>,

    /// Random number generator for sampling.
    rng: StdRng,
}

impl<T> ReplayMemory<T> {
    /// Creates an empty memory whose sampling is seeded from system entropy.
    ///
    /// Fails if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::from_rng(capacity, StdRng::from_entropy())
    }

    /// Creates an empty memory with deterministic sampling.
    ///
    /// Two memories built with the same seed and fed the same pushes return
    /// identical samples. Fails if `capacity` is zero.
    pub fn with_seed(capacity: usize, seed: u64) -> Result<Self> {
        Self::from_rng(capacity, StdRng::seed_from_u64(seed))
    }

    fn from_rng(capacity: usize, rng: StdRng) -> Result<Self> {
        if capacity == 0 {
            return Err(RodneyError::IllegalCapacity(capacity).into());
        }
        debug!("Created replay memory with capacity {}", capacity);

        Ok(Self {
            capacity,
            position: 0,
            items: Vec::with_capacity(capacity),
            rng,
        })
    }

    /// Inserts an element.
    ///
    /// Appends while the memory is not full, otherwise overwrites the element
    /// at the write cursor. The cursor always advances.
    pub fn push(&mut self, item: T) {
        if self.items.len() < self.capacity {
            self.items.push(item);
        } else {
            self.items[self.position] = item;
        }

        self.position = (self.position + 1) % self.capacity;
    }

    /// Returns the number of stored elements, never more than the capacity.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been pushed since creation or the last
    /// [`clear`](Self::clear).
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the maximum number of stored elements.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the slot the next push writes to.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Iterates over the stored elements in slot order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.items.iter()
    }

    /// Removes all elements and resets the write cursor.
    ///
    /// The capacity and the state of the random number generator are kept.
    pub fn clear(&mut self) {
        self.items.clear();
        self.position = 0;
    }

    /// Draws `batch_size` distinct slot indices uniformly from `[0, len())`.
    ///
    /// Indices are returned in the order they were drawn. The request is
    /// validated before anything is drawn, so a rejected call does not touch
    /// the generator.
    pub fn sample_indices(&mut self, batch_size: usize) -> Result<Vec<usize>> {
        let len = self.items.len();
        if batch_size > len {
            return Err(RodneyError::IllegalBatchSize { batch_size, len }.into());
        }
        trace!("Sampling {} of {} elements", batch_size, len);

        Ok(index::sample(&mut self.rng, len, batch_size).into_vec())
    }
}

impl<T: Clone> ReplayMemory<T> {
    /// Returns `batch_size` distinct stored elements chosen uniformly at random.
    ///
    /// Sampling is bounded by the number of stored elements, not by the
    /// capacity. `sample(len())` returns a permutation of the whole content.
    ///
    /// # Errors
    ///
    /// [`RodneyError::IllegalBatchSize`] if `batch_size > len()`. The memory is
    /// left unchanged in that case.
    pub fn sample(&mut self, batch_size: usize) -> Result<Vec<T>> {
        let ixs = self.sample_indices(batch_size)?;
        Ok(ixs.iter().map(|&ix| self.items[ix].clone()).collect())
    }
}

impl<T> ExperienceBufferBase for ReplayMemory<T> {
    type Item = T;

    fn push(&mut self, tr: Self::Item) {
        ReplayMemory::push(self, tr)
    }

    fn len(&self) -> usize {
        ReplayMemory::len(self)
    }
}

impl<T: Clone> ReplayBufferBase for ReplayMemory<T> {
    type Config = ReplayMemoryConfig;
    type Batch = Vec<T>;

    fn build(config: &Self::Config) -> Result<Self> {
        match config.seed {
            Some(seed) => Self::with_seed(config.capacity, seed),
            None => Self::new(config.capacity),
        }
    }

    fn batch(&mut self, size: usize) -> Result<Self::Batch> {
        self.sample(size)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    fn filled(capacity: usize, n: usize, seed: u64) -> ReplayMemory<usize> {
        let mut memory = ReplayMemory::with_seed(capacity, seed).unwrap();
        (0..n).for_each(|i| memory.push(i));
        memory
    }

    fn illegal_batch_size(err: &anyhow::Error) -> Option<(usize, usize)> {
        match err.downcast_ref::<RodneyError>() {
            Some(RodneyError::IllegalBatchSize { batch_size, len }) => Some((*batch_size, *len)),
            _ => None,
        }
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let err = ReplayMemory::<u8>::new(0).err().unwrap();
        assert_eq!(
            err.downcast_ref::<RodneyError>(),
            Some(&RodneyError::IllegalCapacity(0))
        );
        assert!(ReplayMemory::<u8>::with_seed(0, 1).is_err());
    }

    #[test]
    fn test_len_is_bounded_by_capacity() {
        let mut memory = ReplayMemory::with_seed(4, 0).unwrap();
        assert!(memory.is_empty());

        for n in 1..=10 {
            memory.push(n);
            assert_eq!(memory.len(), n.min(4));
            assert!(memory.len() <= memory.capacity());
        }
    }

    #[test]
    fn test_circular_overwrite() {
        let mut memory = ReplayMemory::with_seed(3, 0).unwrap();
        for c in ['A', 'B', 'C', 'D'] {
            memory.push(c);
        }

        assert_eq!(memory.len(), 3);
        assert_eq!(memory.position(), 1);
        assert_eq!(memory.iter().copied().collect::<Vec<_>>(), vec!['D', 'B', 'C']);

        memory.push('E');
        memory.push('F');
        assert_eq!(memory.position(), 0);
        assert_eq!(memory.iter().copied().collect::<Vec<_>>(), vec!['D', 'E', 'F']);
    }

    #[test]
    fn test_cursor_advances_before_full() {
        let memory = filled(5, 2, 0);
        assert_eq!(memory.position(), 2);
        assert_eq!(memory.len(), 2);
    }

    #[test]
    fn test_sample_is_distinct_and_stored() {
        let mut memory = filled(100, 250, 42);
        let stored = memory.iter().copied().collect::<HashSet<_>>();

        for k in [0, 1, 10, 50, 99] {
            let batch = memory.sample(k).unwrap();
            assert_eq!(batch.len(), k);
            let distinct = batch.iter().copied().collect::<HashSet<_>>();
            assert_eq!(distinct.len(), k);
            assert!(distinct.is_subset(&stored));
        }
    }

    #[test]
    fn test_sample_whole_content_is_permutation() {
        let mut memory = filled(7, 5, 3);
        let mut batch = memory.sample(5).unwrap();
        batch.sort_unstable();
        assert_eq!(batch, vec![0, 1, 2, 3, 4]);

        let mut memory = filled(7, 20, 3);
        let mut batch = memory.sample(7).unwrap();
        batch.sort_unstable();
        assert_eq!(batch, vec![13, 14, 15, 16, 17, 18, 19]);
    }

    #[test]
    fn test_sample_is_bounded_by_len() {
        let mut memory = filled(5, 2, 0);
        let err = memory.sample(3).err().unwrap();
        assert_eq!(illegal_batch_size(&err), Some((3, 2)));

        let mut empty = ReplayMemory::<u8>::with_seed(5, 0).unwrap();
        assert!(empty.sample(1).is_err());
        assert!(empty.sample(0).unwrap().is_empty());
    }

    #[test]
    fn test_rejected_sample_does_not_mutate() {
        let mut memory1 = filled(5, 4, 9);
        let mut memory2 = filled(5, 4, 9);

        assert!(memory1.sample(5).is_err());
        assert_eq!(memory1.len(), 4);
        assert_eq!(memory1.position(), 4);
        assert_eq!(
            memory1.iter().collect::<Vec<_>>(),
            memory2.iter().collect::<Vec<_>>()
        );

        // The generator was not advanced by the rejected call.
        assert_eq!(memory1.sample(3).unwrap(), memory2.sample(3).unwrap());
    }

    #[test]
    fn test_same_seed_same_samples() {
        let mut memory1 = filled(125, 125, 1234);
        let mut memory2 = filled(125, 125, 1234);

        for k in [3, 17, 125] {
            assert_eq!(memory1.sample(k).unwrap(), memory2.sample(k).unwrap());
        }
    }

    #[test]
    fn test_sample_indices_in_range() {
        let mut memory = filled(10, 6, 5);
        let ixs = memory.sample_indices(6).unwrap();
        let mut sorted = ixs.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn test_clear() {
        let mut memory = filled(3, 5, 0);
        memory.clear();
        assert!(memory.is_empty());
        assert_eq!(memory.position(), 0);
        assert_eq!(memory.capacity(), 3);

        memory.push(10);
        assert_eq!(memory.sample(1).unwrap(), vec![10]);
    }

    #[test]
    fn test_build_from_config() -> Result<()> {
        let config = ReplayMemoryConfig::default().capacity(8).seed(Some(11));
        let mut memory = ReplayMemory::<i32>::build(&config)?;
        let mut reference = ReplayMemory::<i32>::with_seed(8, 11)?;
        for i in 0..8 {
            ExperienceBufferBase::push(&mut memory, i);
            reference.push(i);
        }
        assert_eq!(ExperienceBufferBase::len(&memory), 8);
        assert_eq!(memory.batch(4)?, reference.sample(4)?);

        let zero = ReplayMemoryConfig::default().capacity(0);
        assert!(ReplayMemory::<i32>::build(&zero).is_err());
        Ok(())
    }
}
