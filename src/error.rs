//! Error types for repairflow operations.

use thiserror::Error;

/// Result type alias for repairflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the job ledger and the sheet reconciler.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field is missing or malformed. The operation is rejected
    /// and no state is mutated.
    #[error("validation: {message}")]
    Validation {
        /// What was wrong with the input.
        message: String,
    },

    /// The referenced job does not exist in the store.
    #[error("job not found: {job_no}")]
    NotFound {
        /// The unknown job number.
        job_no: String,
    },

    /// Reading the existing sheet rows failed for a reason other than the
    /// range simply being empty. The reconciler aborts before any write.
    #[error("sheet read failed ({range}): {message}")]
    ExternalRead {
        /// Range the read targeted.
        range: String,
        /// Transport or API failure detail.
        message: String,
    },

    /// A sheet write (batched update or append) failed. Carries enough
    /// detail for the caller to decide on a full re-run.
    #[error("sheet write failed ({operation} {range}): {message}")]
    ExternalWrite {
        /// Which write operation failed ("update" or "append").
        operation: &'static str,
        /// Range the write targeted.
        range: String,
        /// Transport or API failure detail.
        message: String,
    },

    /// Sheet credentials or target identifier missing/invalid. Fatal for the
    /// sync feature until corrected; lifecycle operations are unaffected.
    #[error("configuration: {message}")]
    Configuration {
        /// What is missing or invalid.
        message: String,
    },

    /// The backing store failed.
    #[error("storage: {0}")]
    Storage(#[from] sqlx::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
