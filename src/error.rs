//! Error types.

use thiserror::Error as ThisError;

/// Errors reported before an annealing run starts.
///
/// Every check happens up front, so a run that starts always finishes
/// with a valid tour.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    /// The city set or the initial tour cannot be annealed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A configuration value would prevent termination or degenerate the search.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
