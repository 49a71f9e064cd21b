//! # Constants
//!
//! Envelope layout and session configuration constants. The envelope is:
//! format tag (7) + salt (16) + nonce (12) + ciphertext (N) + tag (16),
//! for a total of 51 + N bytes.

/// Fixed 7-byte ASCII identifier at the start of every envelope.
///
/// Serves as both magic bytes and version marker: a new wire layout gets a
/// new literal (`GCMv2__`, ...) rather than a version field.
pub const FORMAT_TAG: &[u8; FORMAT_TAG_SIZE] = b"GCMv1__";

/// Length of the format tag in bytes.
pub const FORMAT_TAG_SIZE: usize = 7;

/// Length of the PBKDF2 salt in bytes.
pub const SALT_SIZE: usize = 16;

/// Length of the GCM nonce in bytes (96-bit, the GCM standard size).
pub const NONCE_SIZE: usize = 12;

/// Length of the derived AES-256 key in bytes.
pub const KEY_SIZE: usize = 32;

/// Length of the GCM authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// Size of the envelope header (format tag + salt + nonce).
pub const HEADER_SIZE: usize = FORMAT_TAG_SIZE + SALT_SIZE + NONCE_SIZE;

/// Fixed envelope overhead: header plus trailing tag.
///
/// Also the minimum valid envelope length — a 51-byte envelope carries a
/// zero-length plaintext, which is legal.
pub const ENVELOPE_OVERHEAD: usize = HEADER_SIZE + TAG_SIZE;

/// Minimum allowed PBKDF2 iteration count.
pub const PBKDF2_MIN_ITER: u32 = 1;

/// Maximum allowed PBKDF2 iteration count.
///
/// Set to `5_000_000` to prevent excessive computation times while still
/// allowing high-security configurations.
pub const PBKDF2_MAX_ITER: u32 = 5_000_000;

/// Default PBKDF2 iteration count.
///
/// `300_000` balances brute-force resistance against latency and aligns with
/// OWASP/NIST 2025+ recommendations for PBKDF2-HMAC-SHA256.
///
/// The iteration count is **not** stored in the envelope; decryption must be
/// configured with the count used at encryption time. See
/// [`Aes256Gcm::iterations`](crate::Aes256Gcm::iterations).
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 300_000;

/// Default transfer chunk size in bytes.
///
/// Chunk size affects performance and progress granularity only; envelopes
/// produced with different chunk sizes are indistinguishable.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;
