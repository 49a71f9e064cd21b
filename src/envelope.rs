//! # Envelope Codec
//!
//! Serialization of the fixed-layout header and trailer around the
//! ciphertext. The header is `"GCMv1__"` + salt (16) + nonce (12); the
//! trailer is the 16-byte GCM authentication tag. Salt and nonce are public
//! values; only the tag must match on decryption.

use crate::consts::{FORMAT_TAG, FORMAT_TAG_SIZE, HEADER_SIZE, NONCE_SIZE, SALT_SIZE, TAG_SIZE};
use crate::error::GcmcryptError;
use std::io::{Read, Write};

/// Parsed envelope header: the public per-message values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// PBKDF2 salt, unique per encryption.
    pub salt: [u8; SALT_SIZE],
    /// GCM nonce, unique per derived key.
    pub nonce: [u8; NONCE_SIZE],
}

/// Read exactly `N` bytes into a stack-allocated `[u8; N]`.
#[inline]
pub(crate) fn read_exact_span<R, const N: usize>(reader: &mut R) -> Result<[u8; N], GcmcryptError>
where
    R: Read,
{
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf).map_err(GcmcryptError::Io)?;
    Ok(buf)
}

/// Write the envelope header (format tag, salt, nonce) to `writer`.
///
/// Returns the number of header bytes written ([`HEADER_SIZE`]).
pub fn write_header<W: Write>(
    writer: &mut W,
    salt: &[u8; SALT_SIZE],
    nonce: &[u8; NONCE_SIZE],
) -> Result<u64, GcmcryptError> {
    writer.write_all(FORMAT_TAG)?;
    writer.write_all(salt)?;
    writer.write_all(nonce)?;
    Ok(HEADER_SIZE as u64)
}

/// Map a short read (unexpected EOF) to a format error; leave genuine I/O
/// failures as [`GcmcryptError::Io`].
fn format_on_eof(err: GcmcryptError, msg: &str) -> GcmcryptError {
    match err {
        GcmcryptError::Io(ref io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
            GcmcryptError::Format(msg.into())
        }
        other => other,
    }
}

/// Read and validate the envelope header from `reader`.
///
/// The format tag must match [`FORMAT_TAG`] exactly; any mismatch is a
/// [`GcmcryptError::Format`], never a silent fallback to another layout.
pub fn read_header<R: Read>(reader: &mut R) -> Result<Header, GcmcryptError> {
    let tag = read_exact_span::<_, FORMAT_TAG_SIZE>(reader)
        .map_err(|e| format_on_eof(e, "invalid format: header too short"))?;
    if &tag != FORMAT_TAG {
        return Err(GcmcryptError::Format(
            "invalid format: unrecognized format tag".into(),
        ));
    }

    let salt = read_exact_span::<_, SALT_SIZE>(reader)
        .map_err(|e| format_on_eof(e, "failed to read salt"))?;
    let nonce = read_exact_span::<_, NONCE_SIZE>(reader)
        .map_err(|e| format_on_eof(e, "failed to read nonce"))?;

    Ok(Header { salt, nonce })
}

/// Read the trailing 16-byte authentication tag and verify the stream ends
/// there.
///
/// Trailing data after the tag means the envelope length and the stream
/// length disagree, which is a format error.
pub fn read_tag<R: Read>(reader: &mut R) -> Result<[u8; TAG_SIZE], GcmcryptError> {
    let tag = read_exact_span::<_, TAG_SIZE>(reader)
        .map_err(|e| format_on_eof(e, "unable to read authentication tag"))?;

    let mut probe = [0u8; 1];
    if reader.read(&mut probe)? != 0 {
        return Err(GcmcryptError::Format(
            "trailing data after authentication tag".into(),
        ));
    }

    Ok(tag)
}
