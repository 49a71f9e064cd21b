//! # gcmcrypt
//!
//! Streaming password-based AES-256-GCM encryption with a self-describing
//! envelope format:
//!
//! ```text
//! "GCMv1__" + salt(16) + nonce(12) + ciphertext(N) + tag(16)
//! ```
//!
//! Keys are derived with PBKDF2-HMAC-SHA256 from a password and a fresh
//! per-message salt; salt and nonce are generated from the OS random source
//! on every encryption, so no (key, nonce) pair ever repeats across calls.
//!
//! ## Quick start
//!
//! ```
//! let envelope = gcmcrypt::encrypt(b"attack at dawn", "hunter2")?;
//! assert_eq!(gcmcrypt::decrypt(&envelope, "hunter2")?, b"attack at dawn");
//! assert!(gcmcrypt::decrypt(&envelope, "wrong").is_err());
//! # Ok::<(), gcmcrypt::GcmcryptError>(())
//! ```
//!
//! For streaming I/O, tunable iteration counts, chunk sizes, and progress
//! or cancellation callbacks, use [`Aes256Gcm`] directly.
//!
//! ## Security notes
//!
//! - Wrong password and tampered ciphertext are indistinguishable: both
//!   surface as [`GcmcryptError::Authentication`] at finalization.
//! - During decryption, plaintext is streamed to the sink **before** the tag
//!   is verified. Nothing written to the sink is trustworthy unless the call
//!   returns `Ok`; discard the sink's contents on any failure.
//! - Derived keys and plaintext-holding buffers are overwritten with zeros
//!   on every exit path.
//! - The PBKDF2 iteration count is not part of the envelope; decryption must
//!   be configured with the count used at encryption time.

pub mod consts;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod session;

// High-level API — this is what most users import.
pub use error::GcmcryptError;
pub use session::{decrypt, encrypt, Aes256Gcm};

// Provider seam, public so callers can substitute their own primitives.
pub use crypto::{AeadDecryptor, AeadEncryptor, CryptoProvider, RustCryptoProvider};
