//! Progress gate and cancellation behavior.

mod common;

use common::{encrypt, test_data, TEST_ITERATIONS, TEST_PASSWORD};
use gcmcrypt::consts::{ENVELOPE_OVERHEAD, HEADER_SIZE};
use gcmcrypt::{Aes256Gcm, GcmcryptError};
use std::cell::RefCell;
use std::io::Cursor;
use std::rc::Rc;

type CallLog = Rc<RefCell<Vec<(u64, u64)>>>;

fn recording_session(log: &CallLog, chunk_size: usize) -> Aes256Gcm {
    let log = Rc::clone(log);
    Aes256Gcm::new()
        .iterations(TEST_ITERATIONS)
        .chunk_size(chunk_size)
        .when_progress(move |processed, total| {
            log.borrow_mut().push((processed, total));
            false
        })
}

#[test]
fn encrypt_progress_sequence() {
    let plaintext = test_data(2500); // 3 chunks of 1000 + envelope overhead
    let log: CallLog = Rc::new(RefCell::new(Vec::new()));

    let mut envelope = Vec::new();
    recording_session(&log, 1000)
        .encrypt(&mut Cursor::new(&plaintext), TEST_PASSWORD, &mut envelope)
        .unwrap();

    let total = (2500 + ENVELOPE_OVERHEAD) as u64;
    let expected = vec![
        (HEADER_SIZE as u64, total), // after the header
        (HEADER_SIZE as u64 + 1000, total),
        (HEADER_SIZE as u64 + 2000, total),
        (HEADER_SIZE as u64 + 2500, total),
        (total, total), // after the tag
    ];
    assert_eq!(*log.borrow(), expected);
}

#[test]
fn decrypt_progress_sequence() {
    let envelope = encrypt(&test_data(2500), TEST_PASSWORD);
    let log: CallLog = Rc::new(RefCell::new(Vec::new()));

    let mut plaintext = Vec::new();
    recording_session(&log, 1000)
        .decrypt(&mut Cursor::new(&envelope), TEST_PASSWORD, &mut plaintext)
        .unwrap();

    let total = envelope.len() as u64;
    let overhead = ENVELOPE_OVERHEAD as u64;
    let expected = vec![
        (overhead, total), // header + tag counted up front
        (overhead + 1000, total),
        (overhead + 2000, total),
        (overhead + 2500, total),
        (total, total), // final call, abort return ignored
    ];
    assert_eq!(*log.borrow(), expected);
}

#[test]
fn abort_at_first_gate_stops_after_the_header() {
    let plaintext = test_data(1 << 20);
    let mut envelope = Vec::new();

    let err = Aes256Gcm::new()
        .iterations(TEST_ITERATIONS)
        .when_progress(|_, _| true)
        .encrypt(&mut Cursor::new(&plaintext), TEST_PASSWORD, &mut envelope)
        .unwrap_err();

    assert!(matches!(err, GcmcryptError::Cancelled), "got {err:?}");
    // Only the header was written; documented as discard-on-failure.
    assert_eq!(envelope.len(), HEADER_SIZE);
}

#[test]
fn abort_on_first_chunk_of_a_large_encryption() {
    let plaintext = test_data(1 << 20);
    let mut envelope = Vec::new();

    let err = Aes256Gcm::new()
        .iterations(TEST_ITERATIONS)
        .chunk_size(4096)
        .when_progress(|processed, _| processed > HEADER_SIZE as u64)
        .encrypt(&mut Cursor::new(&plaintext), TEST_PASSWORD, &mut envelope)
        .unwrap_err();

    assert!(matches!(err, GcmcryptError::Cancelled), "got {err:?}");
    // The in-flight chunk completes before the abort is honored.
    assert_eq!(envelope.len(), HEADER_SIZE + 4096);
}

#[test]
fn abort_at_the_final_gate_still_reports_cancellation() {
    let plaintext = test_data(100);
    let mut envelope = Vec::new();

    let err = Aes256Gcm::new()
        .iterations(TEST_ITERATIONS)
        .when_progress(|processed, total| processed == total)
        .encrypt(&mut Cursor::new(&plaintext), TEST_PASSWORD, &mut envelope)
        .unwrap_err();

    assert!(matches!(err, GcmcryptError::Cancelled), "got {err:?}");
}

#[test]
fn decrypt_abort_before_any_ciphertext() {
    let envelope = encrypt(&test_data(5000), TEST_PASSWORD);
    let mut plaintext = Vec::new();

    let err = Aes256Gcm::new()
        .iterations(TEST_ITERATIONS)
        .when_progress(|_, _| true)
        .decrypt(&mut Cursor::new(&envelope), TEST_PASSWORD, &mut plaintext)
        .unwrap_err();

    assert!(matches!(err, GcmcryptError::Cancelled), "got {err:?}");
    assert!(plaintext.is_empty());
}

#[test]
fn no_progress_gate_means_no_cancellation() {
    let plaintext = test_data(5000);
    let envelope = encrypt(&plaintext, TEST_PASSWORD);

    let mut recovered = Vec::new();
    Aes256Gcm::new()
        .iterations(TEST_ITERATIONS)
        .decrypt(&mut Cursor::new(&envelope), TEST_PASSWORD, &mut recovered)
        .unwrap();
    assert_eq!(recovered, plaintext);
}
