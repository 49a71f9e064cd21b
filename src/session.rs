//! # Cipher Session
//!
//! [`Aes256Gcm`] drives one encryption or decryption at a time: it derives
//! the key, writes/reads the envelope header, pumps the source through the
//! AEAD session in fixed-size chunks, and finalizes the authentication tag.
//!
//! A session is reusable across sequential calls — every call constructs a
//! fresh AEAD state from the provider — but is not safe for concurrent use;
//! use one session per thread.

use crate::consts::{
    DEFAULT_CHUNK_SIZE, DEFAULT_PBKDF2_ITERATIONS, ENVELOPE_OVERHEAD, NONCE_SIZE, PBKDF2_MAX_ITER,
    PBKDF2_MIN_ITER, SALT_SIZE, TAG_SIZE,
};
use crate::crypto::{AeadDecryptor, AeadEncryptor, CryptoProvider, RustCryptoProvider};
use crate::envelope;
use crate::error::GcmcryptError;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};
use zeroize::Zeroizing;

/// Progress/cancellation gate: called with (bytes processed, bytes total)
/// after the header, after each chunk, and once more at the end of the
/// operation. Returning `true` aborts with [`GcmcryptError::Cancelled`].
///
/// Cancellation is checked only at chunk boundaries, so an in-flight chunk
/// is always completed before an abort is honored.
type ProgressGate = Box<dyn FnMut(u64, u64) -> bool>;

/// Streaming password-based AES-256-GCM engine.
///
/// Produces and consumes the self-describing envelope
/// `"GCMv1__" + salt(16) + nonce(12) + ciphertext + tag(16)`.
///
/// ```
/// use gcmcrypt::Aes256Gcm;
/// use std::io::Cursor;
///
/// let mut session = Aes256Gcm::new().iterations(10);
///
/// let mut envelope = Vec::new();
/// session.encrypt(&mut Cursor::new(b"hello world"), "correct-password", &mut envelope)?;
///
/// let mut plaintext = Vec::new();
/// session.decrypt(&mut Cursor::new(&envelope), "correct-password", &mut plaintext)?;
/// assert_eq!(plaintext, b"hello world");
/// # Ok::<(), gcmcrypt::GcmcryptError>(())
/// ```
pub struct Aes256Gcm<P: CryptoProvider = RustCryptoProvider> {
    provider: P,
    iterations: u32,
    chunk_size: usize,
    progress: Option<ProgressGate>,
}

impl Aes256Gcm<RustCryptoProvider> {
    /// Create a session with the default provider and default settings.
    pub fn new() -> Self {
        Self::with_provider(RustCryptoProvider)
    }
}

impl Default for Aes256Gcm<RustCryptoProvider> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: CryptoProvider> Aes256Gcm<P> {
    /// Create a session with an explicit cryptography provider.
    pub fn with_provider(provider: P) -> Self {
        Self {
            provider,
            iterations: DEFAULT_PBKDF2_ITERATIONS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            progress: None,
        }
    }

    /// Set the PBKDF2 iteration count (default
    /// [`DEFAULT_PBKDF2_ITERATIONS`]).
    ///
    /// The count is not stored in the envelope: decryption must use the same
    /// value that was configured at encryption time, or key derivation will
    /// silently produce the wrong key and fail at the authentication step.
    pub fn iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the transfer chunk size in bytes (default
    /// [`DEFAULT_CHUNK_SIZE`], minimum 1).
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Install a progress/cancellation gate.
    pub fn when_progress<F>(mut self, gate: F) -> Self
    where
        F: FnMut(u64, u64) -> bool + 'static,
    {
        self.progress = Some(Box::new(gate));
        self
    }

    fn gate(&mut self, processed: u64, total: u64) -> bool {
        match self.progress.as_mut() {
            Some(gate) => gate(processed, total),
            None => false,
        }
    }

    fn validate_config(&self) -> Result<(), GcmcryptError> {
        if !(PBKDF2_MIN_ITER..=PBKDF2_MAX_ITER).contains(&self.iterations) {
            return Err(GcmcryptError::Crypto("invalid KDF iteration count".into()));
        }
        Ok(())
    }

    /// Encrypt `source` into one envelope written to `sink`.
    ///
    /// The source must be seekable so its total length is known up front
    /// (for buffer sizing and progress totals); length is measured from the
    /// current stream position. Zero-length input is legal and produces a
    /// 51-byte envelope.
    ///
    /// On any failure no partial envelope in `sink` is usable and should be
    /// discarded. Key material is zeroed on every exit path.
    pub fn encrypt<R, W>(
        &mut self,
        source: &mut R,
        password: &str,
        sink: &mut W,
    ) -> Result<(), GcmcryptError>
    where
        R: Read + Seek,
        W: Write,
    {
        self.validate_config()?;

        let source_len = stream_len(source)?;
        let total = source_len + ENVELOPE_OVERHEAD as u64;

        let mut salt = [0u8; SALT_SIZE];
        self.provider.random_bytes(&mut salt)?;
        let mut nonce = [0u8; NONCE_SIZE];
        self.provider.random_bytes(&mut nonce)?;

        let key = self.provider.derive_key(password, &salt, self.iterations)?;
        let mut aead = self.provider.encryptor(&key, &nonce)?;
        // Key is zeroed here; an error `?` above drops (and zeroes) it too.
        drop(key);

        let mut processed = envelope::write_header(sink, &salt, &nonce)?;
        if self.gate(processed, total) {
            return Err(GcmcryptError::Cancelled);
        }

        // Buffer briefly holds plaintext before in-place encryption; zeroed
        // on every exit path.
        let mut buf = Zeroizing::new(vec![0u8; self.chunk_size]);
        loop {
            let n = source.read(buf.as_mut_slice())?;
            if n == 0 {
                break;
            }
            let chunk = &mut buf.as_mut_slice()[..n];
            aead.update(chunk)?;
            sink.write_all(chunk)?;

            processed += n as u64;
            if self.gate(processed, total) {
                return Err(GcmcryptError::Cancelled);
            }
        }

        let tag = aead.finalize()?;
        sink.write_all(&tag)?;
        processed += TAG_SIZE as u64;

        // Final gate call with processed == total; an abort here still
        // reports failure even though the envelope is complete.
        if self.gate(processed, total) {
            return Err(GcmcryptError::Cancelled);
        }
        Ok(())
    }

    /// Decrypt one envelope from `source`, writing plaintext to `sink`.
    ///
    /// Inputs shorter than the 51-byte minimum envelope are rejected with a
    /// [`GcmcryptError::Format`] before any cryptographic work.
    ///
    /// Plaintext is streamed to `sink` **before** the tag is verified; on
    /// any failure the caller must discard everything written to `sink`.
    /// Callers that must never observe unauthenticated plaintext should
    /// write to an internal buffer and only use it after `Ok`.
    pub fn decrypt<R, W>(
        &mut self,
        source: &mut R,
        password: &str,
        sink: &mut W,
    ) -> Result<(), GcmcryptError>
    where
        R: Read + Seek,
        W: Write,
    {
        self.validate_config()?;

        let total = stream_len(source)?;
        if total < ENVELOPE_OVERHEAD as u64 {
            return Err(GcmcryptError::Format("encrypted input is too short".into()));
        }

        let header = envelope::read_header(source)?;
        let key = self
            .provider
            .derive_key(password, &header.salt, self.iterations)?;
        let mut aead = self.provider.decryptor(&key, &header.nonce)?;
        drop(key);

        // Header plus the trailing tag count as overhead processed up front.
        let mut processed = ENVELOPE_OVERHEAD as u64;
        if self.gate(processed, total) {
            return Err(GcmcryptError::Cancelled);
        }

        let mut remaining = total - ENVELOPE_OVERHEAD as u64;
        let mut buf = Zeroizing::new(vec![0u8; self.chunk_size]);
        while remaining > 0 {
            let want = remaining.min(self.chunk_size as u64) as usize;
            source.read_exact(&mut buf.as_mut_slice()[..want])?;

            let chunk = &mut buf.as_mut_slice()[..want];
            aead.update(chunk)?;
            sink.write_all(chunk)?;

            processed += want as u64;
            remaining -= want as u64;
            if self.gate(processed, total) {
                return Err(GcmcryptError::Cancelled);
            }
        }

        let tag = envelope::read_tag(source)?;
        aead.set_tag(&tag);
        aead.finalize()?;

        // Operation already complete; an abort return is meaningless here.
        let _ = self.gate(total, total);
        Ok(())
    }
}

/// Length of `source` from its current position, restoring the position.
fn stream_len<R: Read + Seek>(source: &mut R) -> Result<u64, GcmcryptError> {
    let pos = source.stream_position()?;
    let end = source.seek(SeekFrom::End(0))?;
    source.seek(SeekFrom::Start(pos))?;
    Ok(end - pos)
}

/// Encrypt a byte buffer into an envelope with default session settings.
pub fn encrypt(plaintext: &[u8], password: &str) -> Result<Vec<u8>, GcmcryptError> {
    let mut sink = Vec::with_capacity(plaintext.len() + ENVELOPE_OVERHEAD);
    Aes256Gcm::new().encrypt(&mut Cursor::new(plaintext), password, &mut sink)?;
    Ok(sink)
}

/// Decrypt an envelope produced by [`encrypt`] with default settings.
pub fn decrypt(envelope: &[u8], password: &str) -> Result<Vec<u8>, GcmcryptError> {
    let mut sink = Vec::with_capacity(envelope.len().saturating_sub(ENVELOPE_OVERHEAD));
    let mut source = Cursor::new(envelope);
    Aes256Gcm::new().decrypt(&mut source, password, &mut sink)?;
    Ok(sink)
}
