//! Cryptography provider.
//!
//! The engine consumes exactly three primitives — a secure random source, a
//! password-based KDF, and a streaming AEAD session — behind the
//! [`CryptoProvider`] trait. The provider is injected into each
//! [`Aes256Gcm`](crate::Aes256Gcm) session explicitly instead of living in a
//! process-wide singleton; [`RustCryptoProvider`] is the default,
//! implemented on the RustCrypto crates.

pub mod gcm;
pub mod kdf;
pub mod rng;

use crate::consts::{KEY_SIZE, NONCE_SIZE, SALT_SIZE, TAG_SIZE};
use crate::error::GcmcryptError;
use zeroize::Zeroizing;

/// Encrypt-direction AEAD session: chunked update, then finalize to obtain
/// the authentication tag.
pub trait AeadEncryptor {
    /// Encrypt `buf` in place. May be called any number of times; chunk
    /// boundaries do not affect the output.
    fn update(&mut self, buf: &mut [u8]) -> Result<(), GcmcryptError>;

    /// Complete the operation and return the 16-byte authentication tag
    /// covering all ciphertext produced.
    fn finalize(self) -> Result<[u8; TAG_SIZE], GcmcryptError>;
}

/// Decrypt-direction AEAD session: chunked update, set the expected tag,
/// then finalize to authenticate.
pub trait AeadDecryptor {
    /// Decrypt `buf` in place. The output is **not trustworthy** until
    /// [`finalize`](Self::finalize) succeeds.
    fn update(&mut self, buf: &mut [u8]) -> Result<(), GcmcryptError>;

    /// Provide the expected authentication tag. Must be called before
    /// [`finalize`](Self::finalize).
    fn set_tag(&mut self, tag: &[u8; TAG_SIZE]);

    /// Authenticate everything fed through [`update`](Self::update).
    /// Returns [`GcmcryptError::Authentication`] on any mismatch — wrong
    /// password and tampered ciphertext are indistinguishable here.
    fn finalize(self) -> Result<(), GcmcryptError>;
}

/// External cryptography collaborator: random bytes, key derivation, and
/// AEAD session construction.
pub trait CryptoProvider {
    type Encryptor: AeadEncryptor;
    type Decryptor: AeadDecryptor;

    /// Fill `dest` from a cryptographically secure random source.
    fn random_bytes(&self, dest: &mut [u8]) -> Result<(), GcmcryptError>;

    /// Derive a 256-bit key from `password` and `salt`. Deterministic for
    /// identical inputs; the result zeroizes itself on drop.
    fn derive_key(
        &self,
        password: &str,
        salt: &[u8; SALT_SIZE],
        iterations: u32,
    ) -> Result<Zeroizing<[u8; KEY_SIZE]>, GcmcryptError>;

    /// Start an encryption session under (key, nonce).
    fn encryptor(
        &self,
        key: &[u8; KEY_SIZE],
        nonce: &[u8; NONCE_SIZE],
    ) -> Result<Self::Encryptor, GcmcryptError>;

    /// Start a decryption session under (key, nonce).
    fn decryptor(
        &self,
        key: &[u8; KEY_SIZE],
        nonce: &[u8; NONCE_SIZE],
    ) -> Result<Self::Decryptor, GcmcryptError>;
}

/// Default provider: AES-256-GCM via `aes` + `ctr` + `ghash`,
/// PBKDF2-HMAC-SHA256 via `pbkdf2` + `sha2`, and the OS random generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RustCryptoProvider;

impl CryptoProvider for RustCryptoProvider {
    type Encryptor = gcm::GcmEncryptor;
    type Decryptor = gcm::GcmDecryptor;

    fn random_bytes(&self, dest: &mut [u8]) -> Result<(), GcmcryptError> {
        rng::fill_random(dest)
    }

    fn derive_key(
        &self,
        password: &str,
        salt: &[u8; SALT_SIZE],
        iterations: u32,
    ) -> Result<Zeroizing<[u8; KEY_SIZE]>, GcmcryptError> {
        kdf::derive_key(password, salt, iterations)
    }

    fn encryptor(
        &self,
        key: &[u8; KEY_SIZE],
        nonce: &[u8; NONCE_SIZE],
    ) -> Result<Self::Encryptor, GcmcryptError> {
        Ok(gcm::GcmEncryptor::new(key, nonce))
    }

    fn decryptor(
        &self,
        key: &[u8; KEY_SIZE],
        nonce: &[u8; NONCE_SIZE],
    ) -> Result<Self::Decryptor, GcmcryptError> {
        Ok(gcm::GcmDecryptor::new(key, nonce))
    }
}
