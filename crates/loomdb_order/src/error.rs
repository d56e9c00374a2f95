//! Error types for the ordering engine.
//!
//! Comparator operations never return errors; the only fallible boundary
//! is the external option store.

use thiserror::Error;

/// Result type for option store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur when reading from the option store.
///
/// The engine treats every variant the same way: the lookup degrades to an
/// empty label set and sorting proceeds.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The lookup did not complete within the store's read deadline.
    #[error("option lookup timed out after {timeout_ms} ms")]
    Timeout {
        /// The deadline that was exceeded, in milliseconds.
        timeout_ms: u64,
    },

    /// The lookup failed.
    #[error("option lookup failed: {message}")]
    Lookup {
        /// Description of the failure.
        message: String,
    },
}
