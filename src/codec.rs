//! Base64 text armor for envelopes.
//!
//! Standard alphabet with padding and no line breaks, so an encoded envelope
//! is a single line.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

use crate::error::{CryptoError, Result};

pub fn encode(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

pub fn decode(text: &str) -> Result<Vec<u8>> {
    BASE64
        .decode(text)
        .map_err(|e| CryptoError::DecodeFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn known_values() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"f"), "Zg==");
        assert_eq!(encode(b"foobar"), "Zm9vYmFy");
        assert_eq!(decode("Zm9vYg==").unwrap(), b"foob");
    }

    #[test]
    fn empty_text_decodes_to_empty() {
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn long_input_has_no_line_breaks() {
        let text = encode(&[0xABu8; 4096]);
        assert!(!text.contains('\n'));
        assert!(!text.contains('\r'));
    }

    #[test]
    fn malformed_input_fails() {
        for bad in ["!!!invalid!!!", "Zm9", "Zm9v\nYmFy", "Zg=a"] {
            assert!(
                matches!(decode(bad), Err(CryptoError::DecodeFailed(_))),
                "{bad:?} should not decode"
            );
        }
    }

    proptest! {
        #[test]
        fn roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
            let text = encode(&bytes);
            prop_assert!(!text.contains('\n') && !text.contains('\r'));
            prop_assert_eq!(decode(&text).unwrap(), bytes);
        }
    }
}
