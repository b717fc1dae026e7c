//! Passphrase-based authenticated encryption.
//!
//! A key is derived from the passphrase with PBKDF2-HMAC-SHA256 over a fresh
//! random salt, then the payload is sealed with AES-256-GCM under a fresh
//! random nonce. The result is a self-contained envelope:
//!
//! ```text
//! SALT (32) | NONCE (12) | CIPHERTEXT (N) | TAG (16)
//! ```
//!
//! Derived keys are wiped on every exit path and decrypted plaintext is
//! handed out in a [`Zeroizing`] buffer.

mod backend;
mod codec;
pub mod crypto;
mod error;
mod text;

pub use crate::backend::{init, is_initialized, shutdown};
pub use crate::codec::{decode as base64_decode, encode as base64_encode};
pub use crate::crypto::envelope::EnvelopeSummary;
pub use crate::crypto::{Envelope, EnvelopeRef, KdfParams};
pub use crate::error::{CryptoError, ErrorKind, Result};
pub use crate::text::{open_text, open_text_with, seal_text, seal_text_with};

use tracing::debug;
use zeroize::Zeroizing;

/// Seals `plaintext` under `passphrase` with the default KDF parameters.
pub fn encrypt(plaintext: &[u8], passphrase: impl AsRef<[u8]>) -> Result<Envelope> {
    encrypt_with(plaintext, passphrase, KdfParams::default())
}

/// Seals `plaintext` with an explicit iteration count.
///
/// The envelope does not record `kdf`; the same parameters must be passed to
/// [`decrypt_with`].
pub fn encrypt_with(
    plaintext: &[u8],
    passphrase: impl AsRef<[u8]>,
    kdf: KdfParams,
) -> Result<Envelope> {
    let salt = crypto::generate_salt()?;
    let nonce = crypto::generate_nonce()?;
    let key = crypto::derive_key(passphrase.as_ref(), &salt, kdf)?;

    let mut envelope = Envelope::with_plaintext(&salt, &nonce, plaintext)?;
    let tag = match crypto::seal(&key, &nonce, envelope.payload_mut()) {
        Ok(tag) => tag,
        Err(e) => {
            envelope.discard();
            return Err(e);
        }
    };
    envelope.push_tag(&tag);

    debug!(
        plaintext_len = plaintext.len(),
        envelope_len = envelope.len(),
        iterations = kdf.iterations(),
        "sealed envelope"
    );
    Ok(envelope)
}

/// Opens an envelope produced by [`encrypt`].
pub fn decrypt(envelope: &[u8], passphrase: impl AsRef<[u8]>) -> Result<Zeroizing<Vec<u8>>> {
    decrypt_with(envelope, passphrase, KdfParams::default())
}

/// Opens an envelope produced by [`encrypt_with`] using the same `kdf`.
///
/// Nothing is returned unless the tag verifies. A wrong passphrase and a
/// modified envelope are reported identically.
pub fn decrypt_with(
    envelope: &[u8],
    passphrase: impl AsRef<[u8]>,
    kdf: KdfParams,
) -> Result<Zeroizing<Vec<u8>>> {
    let parts = Envelope::parse(envelope)?;
    let key = crypto::derive_key(passphrase.as_ref(), parts.salt(), kdf)?;

    let mut plaintext = Zeroizing::new(Vec::new());
    plaintext
        .try_reserve_exact(parts.ciphertext().len())
        .map_err(|e| CryptoError::AllocationFailed(e.to_string()))?;
    plaintext.extend_from_slice(parts.ciphertext());

    if let Err(e) = crypto::open(&key, parts.nonce(), &mut plaintext, parts.tag()) {
        debug!(envelope_len = envelope.len(), "envelope failed authentication");
        return Err(e);
    }

    debug!(plaintext_len = plaintext.len(), "opened envelope");
    Ok(plaintext)
}
