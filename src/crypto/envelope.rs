//! Envelope byte layout.
//!
//! ```text
//! SALT (32) | NONCE (12) | CIPHERTEXT (N) | TAG (16)
//! ```
//!
//! N equals the plaintext length. There is no magic or version field, so the
//! layout and the KDF parameters are fixed by convention.

use serde::Serialize;

use super::{MIN_ENVELOPE_LEN, NONCE_LEN, SALT_LEN, TAG_LEN, wipe};
use crate::error::{CryptoError, Result};

const CIPHERTEXT_OFFSET: usize = SALT_LEN + NONCE_LEN;

/// An owned, fully assembled envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    bytes: Vec<u8>,
}

impl Envelope {
    /// Total envelope length for a plaintext of `plaintext_len` bytes.
    pub const fn len_for(plaintext_len: usize) -> usize {
        MIN_ENVELOPE_LEN + plaintext_len
    }

    /// Lays out `salt || nonce || plaintext` with room for the tag.
    ///
    /// The plaintext region is encrypted in place afterwards, then the tag is
    /// appended with [`Envelope::push_tag`].
    pub(crate) fn with_plaintext(
        salt: &[u8; SALT_LEN],
        nonce: &[u8; NONCE_LEN],
        plaintext: &[u8],
    ) -> Result<Self> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(Self::len_for(plaintext.len()))
            .map_err(|e| CryptoError::AllocationFailed(e.to_string()))?;

        bytes.extend_from_slice(salt);
        bytes.extend_from_slice(nonce);
        bytes.extend_from_slice(plaintext);

        Ok(Self { bytes })
    }

    pub(crate) fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[CIPHERTEXT_OFFSET..]
    }

    pub(crate) fn push_tag(&mut self, tag: &[u8; TAG_LEN]) {
        self.bytes.extend_from_slice(tag);
    }

    /// Erases the payload region; used when sealing fails midway.
    pub(crate) fn discard(mut self) {
        wipe(self.payload_mut());
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Splits raw envelope bytes into their fields.
    pub fn parse(data: &[u8]) -> Result<EnvelopeRef<'_>> {
        EnvelopeRef::from_bytes(data)
    }
}

impl AsRef<[u8]> for Envelope {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Borrowed view over the fields of an envelope.
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeRef<'a> {
    salt: &'a [u8; SALT_LEN],
    nonce: &'a [u8; NONCE_LEN],
    ciphertext: &'a [u8],
    tag: &'a [u8; TAG_LEN],
}

impl<'a> EnvelopeRef<'a> {
    pub fn from_bytes(data: &'a [u8]) -> Result<Self> {
        if data.len() < MIN_ENVELOPE_LEN {
            return Err(CryptoError::InvalidEnvelope(format!(
                "expected at least {MIN_ENVELOPE_LEN} bytes, got {}",
                data.len()
            )));
        }

        let (salt, rest) = data.split_at(SALT_LEN);
        let (nonce, rest) = rest.split_at(NONCE_LEN);
        let (ciphertext, tag) = rest.split_at(rest.len() - TAG_LEN);

        Ok(Self {
            salt: fixed(salt)?,
            nonce: fixed(nonce)?,
            ciphertext,
            tag: fixed(tag)?,
        })
    }

    pub fn salt(&self) -> &'a [u8; SALT_LEN] {
        self.salt
    }

    pub fn nonce(&self) -> &'a [u8; NONCE_LEN] {
        self.nonce
    }

    pub fn ciphertext(&self) -> &'a [u8] {
        self.ciphertext
    }

    pub fn tag(&self) -> &'a [u8; TAG_LEN] {
        self.tag
    }

    pub fn summary(&self) -> EnvelopeSummary {
        EnvelopeSummary {
            total_len: Envelope::len_for(self.ciphertext.len()),
            salt: hex::encode(self.salt),
            nonce: hex::encode(self.nonce),
            ciphertext_len: self.ciphertext.len(),
            tag_len: TAG_LEN,
        }
    }
}

fn fixed<const N: usize>(bytes: &[u8]) -> Result<&[u8; N]> {
    bytes
        .try_into()
        .map_err(|_| CryptoError::InvalidEnvelope(format!("field must be {N} bytes")))
}

/// Public, non-secret description of an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvelopeSummary {
    pub total_len: usize,
    pub salt: String,
    pub nonce: String,
    pub ciphertext_len: usize,
    pub tag_len: usize,
}
