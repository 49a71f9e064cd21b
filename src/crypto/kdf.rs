//! PBKDF2-HMAC-SHA256 key derivation.
//!
//! Deterministic: the same (password, salt, iterations) always yields the
//! same 256-bit key, on both the encrypt and decrypt paths. The iteration
//! count is a tunable cost parameter and is deliberately **not** part of the
//! envelope; callers varying it must persist it out of band.

use crate::consts::{KEY_SIZE, PBKDF2_MAX_ITER, PBKDF2_MIN_ITER, SALT_SIZE};
use crate::error::GcmcryptError;
use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha2::Sha256;
use zeroize::Zeroizing;

/// Derive a 256-bit AES key from `password` and `salt`.
///
/// The returned key is wrapped in [`Zeroizing`], so it is overwritten with
/// zero bytes when dropped — on every exit path of the caller, including
/// error returns.
pub fn derive_key(
    password: &str,
    salt: &[u8; SALT_SIZE],
    iterations: u32,
) -> Result<Zeroizing<[u8; KEY_SIZE]>, GcmcryptError> {
    if !(PBKDF2_MIN_ITER..=PBKDF2_MAX_ITER).contains(&iterations) {
        return Err(GcmcryptError::Crypto("invalid KDF iteration count".into()));
    }

    let mut key = Zeroizing::new([0u8; KEY_SIZE]);
    pbkdf2::<Hmac<Sha256>>(password.as_bytes(), salt, iterations, key.as_mut_slice())
        .map_err(|e| GcmcryptError::Crypto(format!("PBKDF2 failed: {e}")))?;

    Ok(key)
}
