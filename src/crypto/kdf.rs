use std::fmt;

use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{ITERATIONS, KEY_LEN};
use crate::error::{CryptoError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: ITERATIONS,
        }
    }
}

impl KdfParams {
    pub fn new(iterations: u32) -> Result<Self> {
        let params = Self { iterations };
        params.validate()?;
        Ok(params)
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations < 1 {
            return Err(CryptoError::KeyDerivationFailed(
                "pbkdf2 iterations must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A 256-bit key derived from a passphrase.
///
/// The bytes are wiped when the key is dropped, so early returns through `?`
/// never leave key material behind.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Derives a 32-byte key with PBKDF2-HMAC-SHA256.
pub fn derive_key(passphrase: &[u8], salt: &[u8], kdf: KdfParams) -> Result<DerivedKey> {
    kdf.validate()?;

    let mut key = DerivedKey {
        bytes: [0u8; KEY_LEN],
    };

    pbkdf2::<Hmac<Sha256>>(passphrase, salt, kdf.iterations, &mut key.bytes)
        .map_err(|e| CryptoError::KeyDerivationFailed(format!("pbkdf2 failed: {e}")))?;

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> KdfParams {
        KdfParams::new(1).unwrap()
    }

    #[test]
    fn kdf_is_deterministic() {
        let salt = [42u8; 32];

        let k1 = derive_key(b"password", &salt, fast()).unwrap();
        let k2 = derive_key(b"password", &salt, fast()).unwrap();

        assert_eq!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn salt_affects_output() {
        let k1 = derive_key(b"pw", &[1u8; 32], fast()).unwrap();
        let k2 = derive_key(b"pw", &[2u8; 32], fast()).unwrap();

        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn iterations_affect_output() {
        let salt = [7u8; 32];

        let k1 = derive_key(b"pw", &salt, KdfParams::new(2).unwrap()).unwrap();
        let k2 = derive_key(b"pw", &salt, KdfParams::new(3).unwrap()).unwrap();

        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn default_uses_protocol_iteration_count() {
        assert_eq!(KdfParams::default().iterations(), 100_000);
    }

    #[test]
    fn zero_iterations_fail_gracefully() {
        assert!(matches!(
            KdfParams::new(0),
            Err(CryptoError::KeyDerivationFailed(_))
        ));
    }

    #[test]
    fn pbkdf2_sha256_known_vectors() {
        let cases = [
            (1, "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"),
            (2, "ae4d0c95af6b46d32d0adff928f06dd02a303f8ef3c251dfd6e2d85a95474c43"),
            (4096, "c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a"),
        ];

        for (iterations, expected) in cases {
            let kdf = KdfParams::new(iterations).unwrap();
            let key = derive_key(b"password", b"salt", kdf).unwrap();
            assert_eq!(hex::encode(key.as_bytes()), expected);
        }
    }

    #[test]
    fn zeroize_clears_key() {
        let mut key = derive_key(b"pw", &[3u8; 32], fast()).unwrap();
        key.zeroize();
        assert_eq!(key.as_bytes(), &[0u8; KEY_LEN]);
    }

    #[test]
    fn derived_key_is_zeroize_on_drop() {
        fn assert_zeroize_on_drop<T: ZeroizeOnDrop>() {}
        assert_zeroize_on_drop::<DerivedKey>();
    }

    #[test]
    fn debug_is_redacted() {
        let key = derive_key(b"pw", &[3u8; 32], fast()).unwrap();
        let debug = format!("{key:?}");
        assert!(debug.contains("[REDACTED]"));
    }
}
