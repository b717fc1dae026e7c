//! Error types for sealing and opening envelopes.

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Every way a sealing, opening or codec operation can fail.
///
/// Each operation reports exactly one of these. Wrong passphrases and tampered
/// envelopes both surface as [`CryptoError::AuthenticationFailed`].
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The OS random source could not produce salt or nonce bytes.
    #[error("random generation failed: {0}")]
    RandomGenerationFailed(String),

    /// PBKDF2 rejected its inputs or parameters.
    #[error("key derivation failed: {0}")]
    KeyDerivationFailed(String),

    /// The output buffer could not be reserved.
    #[error("allocation failed: {0}")]
    AllocationFailed(String),

    /// The cipher refused the derived key.
    #[error("cipher initialization failed: {0}")]
    CipherInitFailed(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    /// The payload authenticated but could not be turned into the requested form.
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("wrong passphrase or corrupted data")]
    AuthenticationFailed,

    /// Input too short to hold salt, nonce and tag.
    #[error("invalid envelope: {0}")]
    InvalidEnvelope(String),

    #[error("base64 decoding failed: {0}")]
    DecodeFailed(String),
}

/// Field-less category of a [`CryptoError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    RandomGenerationFailed,
    KeyDerivationFailed,
    AllocationFailed,
    CipherInitFailed,
    EncryptionFailed,
    DecryptionFailed,
    AuthenticationFailed,
    InvalidEnvelope,
    DecodeFailed,
}

impl CryptoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CryptoError::RandomGenerationFailed(_) => ErrorKind::RandomGenerationFailed,
            CryptoError::KeyDerivationFailed(_) => ErrorKind::KeyDerivationFailed,
            CryptoError::AllocationFailed(_) => ErrorKind::AllocationFailed,
            CryptoError::CipherInitFailed(_) => ErrorKind::CipherInitFailed,
            CryptoError::EncryptionFailed(_) => ErrorKind::EncryptionFailed,
            CryptoError::DecryptionFailed(_) => ErrorKind::DecryptionFailed,
            CryptoError::AuthenticationFailed => ErrorKind::AuthenticationFailed,
            CryptoError::InvalidEnvelope(_) => ErrorKind::InvalidEnvelope,
            CryptoError::DecodeFailed(_) => ErrorKind::DecodeFailed,
        }
    }

    /// `true` when the passphrase was wrong or the data was altered.
    pub fn is_authentication(&self) -> bool {
        matches!(self, CryptoError::AuthenticationFailed)
    }

    /// `true` for failures of the host environment rather than of the input.
    ///
    /// `KeyDerivationFailed` also covers rejected [`KdfParams`](crate::KdfParams),
    /// such as a zero iteration count; the CLI refuses those before they get here.
    pub fn is_system(&self) -> bool {
        matches!(
            self,
            CryptoError::RandomGenerationFailed(_)
                | CryptoError::KeyDerivationFailed(_)
                | CryptoError::AllocationFailed(_)
                | CryptoError::CipherInitFailed(_)
        )
    }
}
