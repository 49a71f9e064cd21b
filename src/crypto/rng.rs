//! Cryptographically secure randomness for salts and nonces.
//!
//! Uses a thread-local [`OsRng`] so repeated fills on one thread avoid
//! re-opening the OS entropy source.

use crate::error::GcmcryptError;
use rand::{rngs::OsRng, TryRngCore};
use std::cell::RefCell;

thread_local! {
    static RNG: RefCell<OsRng> = const { RefCell::new(OsRng) };
}

/// Fill `dest` with bytes from the OS random generator.
///
/// A failing entropy source is reported as a [`GcmcryptError::Crypto`] —
/// salt/nonce generation failure aborts the whole operation.
pub fn fill_random(dest: &mut [u8]) -> Result<(), GcmcryptError> {
    RNG.with(|rng_cell| {
        rng_cell
            .borrow_mut()
            .try_fill_bytes(dest)
            .map_err(|e| GcmcryptError::Crypto(format!("random generation failed: {e}")))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_and_varies() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        fill_random(&mut a).unwrap();
        fill_random(&mut b).unwrap();

        // 2^-256 false-failure probability is acceptable.
        assert_ne!(a, b);
    }
}
