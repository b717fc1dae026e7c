//! Sealing of UTF-8 text into a single line of base64.

use zeroize::Zeroizing;

use crate::crypto::KdfParams;
use crate::error::{CryptoError, Result};
use crate::{codec, decrypt_with, encrypt_with};

/// Encrypts `plaintext` and armors the envelope as base64.
pub fn seal_text(plaintext: &str, passphrase: impl AsRef<[u8]>) -> Result<String> {
    seal_text_with(plaintext, passphrase, KdfParams::default())
}

pub fn seal_text_with(
    plaintext: &str,
    passphrase: impl AsRef<[u8]>,
    kdf: KdfParams,
) -> Result<String> {
    let envelope = encrypt_with(plaintext.as_bytes(), passphrase, kdf)?;
    Ok(codec::encode(envelope.as_bytes()))
}

/// Reverses [`seal_text`]. Leading and trailing ASCII whitespace is ignored.
pub fn open_text(armored: &str, passphrase: impl AsRef<[u8]>) -> Result<Zeroizing<String>> {
    open_text_with(armored, passphrase, KdfParams::default())
}

pub fn open_text_with(
    armored: &str,
    passphrase: impl AsRef<[u8]>,
    kdf: KdfParams,
) -> Result<Zeroizing<String>> {
    let envelope = codec::decode(armored.trim_ascii())?;
    let plaintext = decrypt_with(&envelope, passphrase, kdf)?;

    let text = std::str::from_utf8(&plaintext).map_err(|e| {
        CryptoError::DecryptionFailed(format!("plaintext is not valid UTF-8: {e}"))
    })?;

    Ok(Zeroizing::new(text.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn fast() -> KdfParams {
        KdfParams::new(1).unwrap()
    }

    #[test]
    fn unicode_roundtrip() {
        let messages = [
            "Message simple",
            "accents éàùç",
            "emoji 🔐🔒✅",
            "こんにちは世界",
            "multi\nline\ntext",
            "",
        ];

        for message in messages {
            let sealed = seal_text_with(message, "pw", fast()).unwrap();
            assert!(!sealed.contains('\n'));

            let opened = open_text_with(&sealed, "pw", fast()).unwrap();
            assert_eq!(opened.as_str(), message);
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let sealed = seal_text_with("hi", "pw", fast()).unwrap();
        let padded = format!("  {sealed}\r\n");

        assert_eq!(open_text_with(&padded, "pw", fast()).unwrap().as_str(), "hi");
    }

    #[test]
    fn invalid_base64_is_decode_failure() {
        let err = open_text_with("not base64 at all!", "pw", fast()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeFailed);
    }

    #[test]
    fn short_armor_is_invalid_envelope() {
        let err = open_text_with("aGVsbG8=", "pw", fast()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEnvelope);
    }

    #[test]
    fn non_utf8_plaintext_is_decryption_failure() {
        let envelope = encrypt_with(&[0xFF, 0xFE, 0x00], "pw", fast()).unwrap();
        let armored = codec::encode(envelope.as_bytes());

        let err = open_text_with(&armored, "pw", fast()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecryptionFailed);
    }

    #[test]
    fn wrong_passphrase_is_authentication_failure() {
        let sealed = seal_text_with("secret", "right", fast()).unwrap();
        let err = open_text_with(&sealed, "wrong", fast()).unwrap_err();
        assert!(err.is_authentication());
    }
}
