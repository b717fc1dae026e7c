//! Cryptographic primitives for passphrase envelopes.
//!
//! Provides key derivation, authenticated encryption, envelope layout
//! handling and secure erasure of key material.

pub mod aead;
pub mod envelope;
pub mod kdf;
pub mod random;
pub mod wipe;

pub use aead::{open, seal};
pub use envelope::{Envelope, EnvelopeRef};
pub use kdf::{DerivedKey, KdfParams, derive_key};
pub use random::{generate_nonce, generate_salt};
pub use wipe::wipe;

/// Length of the salt (32 bytes).
pub const SALT_LEN: usize = 32;
/// Length of the nonce (12 bytes for AES-256-GCM).
pub const NONCE_LEN: usize = 12;
/// Length of the derived key (32 bytes / 256 bits).
pub const KEY_LEN: usize = 32;
/// Length of the GCM authentication tag (16 bytes).
pub const TAG_LEN: usize = 16;
/// Default PBKDF2-HMAC-SHA256 iteration count.
pub const ITERATIONS: u32 = 100_000;
/// Smallest valid envelope: salt, nonce and tag around an empty ciphertext.
pub const MIN_ENVELOPE_LEN: usize = SALT_LEN + NONCE_LEN + TAG_LEN;
