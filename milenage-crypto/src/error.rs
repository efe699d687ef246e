//! Milenage error types

use thiserror::Error;

/// Milenage error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MilenageError {
    /// A byte buffer had the wrong length
    #[error("Invalid {field} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Name of the offending input (RAND, SQN, ...)
        field: &'static str,
        /// Required length in bytes
        expected: usize,
        /// Supplied length in bytes
        actual: usize,
    },
    /// A hex string was malformed or had the wrong length
    #[error("Invalid hex value: {0}")]
    InvalidHex(String),
    /// Rotation constant outside 0..=127
    #[error("Rotation constant {0} out of range (must be between 0 and 127 inclusive)")]
    RotationOutOfRange(u8),
    /// Rotation requested with a negative bit count
    #[error("Rotation amount can not be negative: {0}")]
    NegativeRotation(i32),
    /// Byte range outside the 16-byte block
    #[error("Byte range {start}..{end} out of bounds")]
    SliceOutOfBounds {
        /// Range start (inclusive)
        start: usize,
        /// Range end (exclusive)
        end: usize,
    },
    /// The block cipher primitive failed
    #[error("Cipher failure: {0}")]
    Cipher(String),
    /// AUTN or AUTS carried a MAC that does not match the recomputed one
    #[error("MAC verification failed")]
    MacMismatch,
    /// A parallel stage task panicked or was cancelled
    #[error("Stage task failed: {0}")]
    TaskJoin(String),
}

/// Result type for Milenage operations
pub type MilenageResult<T> = Result<T, MilenageError>;

impl From<MilenageError> for milenage_common::Error {
    fn from(err: MilenageError) -> Self {
        match err {
            MilenageError::RotationOutOfRange(_) | MilenageError::InvalidHex(_) => {
                milenage_common::Error::Config(err.to_string())
            }
            other => milenage_common::Error::Crypto(other.to_string()),
        }
    }
}

/// Checks that `data` has exactly `expected` bytes.
pub(crate) fn check_len(field: &'static str, data: &[u8], expected: usize) -> MilenageResult<()> {
    if data.len() != expected {
        return Err(MilenageError::InvalidLength {
            field,
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}
