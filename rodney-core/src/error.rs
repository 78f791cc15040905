//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
///
/// All variants are raised synchronously for invalid arguments; nothing is
/// retried and no partial result is returned.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum RodneyError {
    /// The requested batch is larger than the number of stored elements.
    #[error("Illegal batch size: {batch_size} (stored elements: {len})")]
    IllegalBatchSize {
        /// Requested batch size.
        batch_size: usize,

        /// Number of elements stored when the request was made.
        len: usize,
    },

    /// A replay memory must hold at least one element.
    #[error("Illegal capacity: {0}")]
    IllegalCapacity(usize),

    /// A loss was requested over an empty batch.
    #[error("Empty batch")]
    EmptyBatch,

    /// Temperature of Boltzmann probabilities must be positive and finite.
    #[error("Illegal temperature: {0}")]
    IllegalTemperature(f32),

    /// Action probabilities were requested for no action values.
    #[error("Empty action values")]
    EmptyValues,
}
