//! # Error Types
//!
//! This module defines the error type used throughout the library.
//! All operations return [`Result<T, GcmcryptError>`](GcmcryptError).

use thiserror::Error;

/// The error type for all envelope encryption/decryption operations.
///
/// Wrong-password and tampered-ciphertext failures are deliberately
/// indistinguishable: both surface as [`GcmcryptError::Authentication`]
/// with no further detail, so callers cannot be turned into an oracle
/// that separates the two.
#[derive(Error, Debug)]
pub enum GcmcryptError {
    /// I/O error while reading the source or writing the sink.
    ///
    /// Wraps [`std::io::Error`]; stream failures are failures of the current
    /// call, never process-fatal.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Envelope format error.
    ///
    /// Bad or short header, wrong format tag, truncated trailer, or trailing
    /// garbage after the authentication tag. Detected before or independent
    /// of cryptographic work; the input should be rejected, not retried.
    #[error("Format error: {0}")]
    Format(String),

    /// Cryptographic operation failed.
    ///
    /// KDF derivation failures, cipher initialization/update failures, random
    /// generation failures, or invalid session configuration (iteration count
    /// out of range, message beyond the GCM length cap).
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Authentication failed at finalization.
    ///
    /// Either the password was wrong or the envelope was modified — the two
    /// cases are intentionally not differentiated. Any plaintext already
    /// written to the sink **must be discarded**.
    #[error("authentication failed: wrong password or corrupted data")]
    Authentication,

    /// The operation was aborted by the progress callback.
    ///
    /// Partially written output in the sink is the caller's responsibility
    /// to discard.
    #[error("operation cancelled by progress callback")]
    Cancelled,
}

impl From<&'static str> for GcmcryptError {
    fn from(msg: &'static str) -> Self {
        GcmcryptError::Crypto(msg.to_string())
    }
}
