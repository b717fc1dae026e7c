//! AES-256-GCM over caller-owned buffers.
//!
//! The tag is kept detached from the ciphertext so the envelope can place it
//! after the payload.

use aes_gcm::{
    Aes256Gcm, Nonce, Tag,
    aead::{AeadInPlace, KeyInit},
};

use super::{DerivedKey, NONCE_LEN, TAG_LEN};
use crate::error::{CryptoError, Result};

fn cipher(key: &DerivedKey) -> Result<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::CipherInitFailed(e.to_string()))
}

/// Encrypts `buffer` in place and returns the authentication tag.
pub fn seal(
    key: &DerivedKey,
    nonce: &[u8; NONCE_LEN],
    buffer: &mut [u8],
) -> Result<[u8; TAG_LEN]> {
    let cipher = cipher(key)?;

    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(nonce), b"", buffer)
        .map_err(|_| {
            CryptoError::EncryptionFailed("aes-gcm rejected the payload".to_string())
        })?;

    let mut out = [0u8; TAG_LEN];
    out.copy_from_slice(&tag);
    Ok(out)
}

/// Verifies `tag` and decrypts `buffer` in place.
///
/// The tag is checked before any keystream is applied, so on failure `buffer`
/// still holds the ciphertext.
pub fn open(
    key: &DerivedKey,
    nonce: &[u8; NONCE_LEN],
    buffer: &mut [u8],
    tag: &[u8; TAG_LEN],
) -> Result<()> {
    let cipher = cipher(key)?;

    cipher
        .decrypt_in_place_detached(Nonce::from_slice(nonce), b"", buffer, Tag::from_slice(tag))
        .map_err(|_| CryptoError::AuthenticationFailed)
}
