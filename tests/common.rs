//! Common constants and helpers shared across test files.

use gcmcrypt::Aes256Gcm;
use std::io::Cursor;

/// Fast iteration count for tests — KDF cost is benchmarked in benches/.
pub const TEST_ITERATIONS: u32 = 10;

/// Standard test password used across test files.
#[allow(dead_code)] // Used across multiple test files
pub const TEST_PASSWORD: &str = "correct-password";

/// Encrypt `plaintext` with test-speed settings and the given chunk size.
#[allow(dead_code)] // Used across multiple test files
pub fn encrypt_chunked(plaintext: &[u8], password: &str, chunk_size: usize) -> Vec<u8> {
    let mut envelope = Vec::new();
    Aes256Gcm::new()
        .iterations(TEST_ITERATIONS)
        .chunk_size(chunk_size)
        .encrypt(&mut Cursor::new(plaintext), password, &mut envelope)
        .expect("encryption failed");
    envelope
}

/// Encrypt with test-speed settings and the default chunk size.
#[allow(dead_code)] // Used across multiple test files
pub fn encrypt(plaintext: &[u8], password: &str) -> Vec<u8> {
    encrypt_chunked(plaintext, password, 1024)
}

/// Decrypt with test-speed settings and the given chunk size.
#[allow(dead_code)] // Used across multiple test files
pub fn decrypt_chunked(
    envelope: &[u8],
    password: &str,
    chunk_size: usize,
) -> Result<Vec<u8>, gcmcrypt::GcmcryptError> {
    let mut plaintext = Vec::new();
    Aes256Gcm::new()
        .iterations(TEST_ITERATIONS)
        .chunk_size(chunk_size)
        .decrypt(&mut Cursor::new(envelope), password, &mut plaintext)?;
    Ok(plaintext)
}

/// Decrypt with test-speed settings and the default chunk size.
#[allow(dead_code)] // Used across multiple test files
pub fn decrypt(envelope: &[u8], password: &str) -> Result<Vec<u8>, gcmcrypt::GcmcryptError> {
    decrypt_chunked(envelope, password, 1024)
}

/// Deterministic pseudo-random test data (not cryptographic).
#[allow(dead_code)] // Used across multiple test files
pub fn test_data(len: usize) -> Vec<u8> {
    let mut state = 0x2545F4914F6CDD1Du64;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state as u8
        })
        .collect()
}
