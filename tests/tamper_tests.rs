//! Tamper detection: flipping any single bit anywhere in an envelope must
//! make decryption fail — never succeed with wrong plaintext.

mod common;

use common::{decrypt, encrypt, TEST_PASSWORD};
use gcmcrypt::consts::FORMAT_TAG_SIZE;
use gcmcrypt::GcmcryptError;

#[test]
fn every_single_bit_flip_is_detected() {
    let envelope = encrypt(b"hello world", TEST_PASSWORD);

    for byte_index in 0..envelope.len() {
        for bit in 0..8 {
            let mut tampered = envelope.clone();
            tampered[byte_index] ^= 1 << bit;

            let err = decrypt(&tampered, TEST_PASSWORD).expect_err(&format!(
                "bit {bit} of byte {byte_index} flipped but decryption succeeded"
            ));

            if byte_index < FORMAT_TAG_SIZE {
                assert!(
                    matches!(err, GcmcryptError::Format(_)),
                    "byte {byte_index} bit {bit}: {err:?}"
                );
            } else {
                // Salt, nonce, ciphertext, and tag corruption all surface as
                // the same authentication failure.
                assert!(
                    matches!(err, GcmcryptError::Authentication),
                    "byte {byte_index} bit {bit}: {err:?}"
                );
            }
        }
    }
}

#[test]
fn swapped_salt_and_tag_regions_fail() {
    // Splicing fields between two valid envelopes must not authenticate.
    let a = encrypt(b"message a", TEST_PASSWORD);
    let b = encrypt(b"message b", TEST_PASSWORD);

    let mut spliced = a.clone();
    spliced[7..23].copy_from_slice(&b[7..23]); // salt from the other envelope
    assert!(matches!(
        decrypt(&spliced, TEST_PASSWORD),
        Err(GcmcryptError::Authentication)
    ));

    let tag_start = a.len() - 16;
    let mut spliced = a.clone();
    spliced[tag_start..].copy_from_slice(&b[b.len() - 16..]);
    assert!(matches!(
        decrypt(&spliced, TEST_PASSWORD),
        Err(GcmcryptError::Authentication)
    ));
}
