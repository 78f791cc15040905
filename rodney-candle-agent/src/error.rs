//! Errors in the crate.
use thiserror::Error;

/// Errors raised by networks and demos.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum AgentError {
    /// Input of a network does not have the expected shape.
    #[error("Matrix dimensions must agree: expected (_, {expected}), got {actual:?}")]
    DimensionMismatch {
        /// Expected number of columns.
        expected: usize,

        /// Actual shape of the input.
        actual: Vec<usize>,
    },

    /// A configuration describes an unusable network or demo.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Training or evaluation was requested before any data was generated.
    #[error("No data; call generate_random_data() first")]
    NoData,
}
