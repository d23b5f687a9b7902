//! Error handling for the chainmap library
//!
//! The error surface is deliberately small: the only fallible operation on a
//! well-formed map is construction, which rejects a zero-slot table. Absent
//! keys are reported through `Option`, not through this module.

use thiserror::Error;

/// Main error type for the chainmap library
#[derive(Error, Debug)]
pub enum ChainMapError {
    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl ChainMapError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ChainMapError>;

/// Assert that a table size is usable (at least one bucket)
///
/// A zero-length table makes the indexing function undefined, so construction
/// must fail fast rather than hand back an unusable map.
#[inline]
pub fn check_table_size(table_size: usize) -> Result<()> {
    if table_size == 0 {
        Err(ChainMapError::configuration(
            "table size must be at least 1",
        ))
    } else {
        Ok(())
    }
}
