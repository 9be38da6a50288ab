//! Base64 decoding of uploaded audio
//!
//! First and cheapest rejection point: nothing reaches the container loader
//! unless it is strict base64 and large enough to hold a real container.

use super::error::IntakeError;
use base64::{engine::general_purpose, Engine as _};
use serde_json::Value;
use tracing::debug;

/// Decoded payloads below this size cannot be a real audio container
pub const MIN_AUDIO_BYTES: usize = 1024;

/// Decode a base64 string into raw container bytes
///
/// Surrounding whitespace is ignored; anything else outside the standard
/// alphabet, or non-canonical padding, is rejected.
pub fn decode_base64_audio(encoded: &str) -> Result<Vec<u8>, IntakeError> {
    let trimmed = encoded.trim();
    if trimmed.is_empty() {
        return Err(IntakeError::EmptyInput);
    }

    let bytes = general_purpose::STANDARD
        .decode(trimmed)
        .map_err(|e| {
            debug!("Base64 decode failed: {}", e);
            IntakeError::InvalidEncoding
        })?;

    debug!("Decoded {} bytes of audio payload", bytes.len());
    check_min_size(bytes)
}

/// Reject payloads too small to hold an audio container
pub fn check_min_size(bytes: Vec<u8>) -> Result<Vec<u8>, IntakeError> {
    if bytes.len() < MIN_AUDIO_BYTES {
        return Err(IntakeError::TooSmall { len: bytes.len() });
    }
    Ok(bytes)
}

/// Decode base64 text read as raw bytes, e.g. from a file
///
/// Bytes that are not UTF-8 are not a text string at all.
pub fn decode_base64_text(raw: &[u8]) -> Result<Vec<u8>, IntakeError> {
    let encoded = std::str::from_utf8(raw).map_err(|e| {
        debug!("Base64 text is not UTF-8: {}", e);
        IntakeError::InvalidInputType
    })?;
    decode_base64_audio(encoded)
}

/// Decode a JSON field that should hold a base64 string
///
/// Absent, `null`, and non-string values are all `InvalidInputType`.
pub fn decode_base64_value(value: Option<&Value>) -> Result<Vec<u8>, IntakeError> {
    match value {
        Some(Value::String(encoded)) => decode_base64_audio(encoded),
        _ => Err(IntakeError::InvalidInputType),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encode(bytes: &[u8]) -> String {
        general_purpose::STANDARD.encode(bytes)
    }

    #[test]
    fn test_valid_payload() {
        let payload = vec![0u8; 2048];
        let decoded = decode_base64_audio(&encode(&payload)).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let payload = vec![7u8; 1500];
        let encoded = format!("  \n{}\t ", encode(&payload));
        assert_eq!(decode_base64_audio(&encoded).unwrap(), payload);
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(decode_base64_audio(""), Err(IntakeError::EmptyInput));
        assert_eq!(decode_base64_audio("   \n\t"), Err(IntakeError::EmptyInput));
    }

    #[test]
    fn test_invalid_alphabet() {
        assert_eq!(
            decode_base64_audio("not base64 at all!"),
            Err(IntakeError::InvalidEncoding)
        );
    }

    #[test]
    fn test_bad_padding_is_rejected() {
        // Canonical form of "AB" is "QUI="
        assert_eq!(decode_base64_audio("QUI"), Err(IntakeError::InvalidEncoding));
        assert_eq!(decode_base64_audio("QUI=="), Err(IntakeError::InvalidEncoding));
    }

    #[test]
    fn test_too_small_regardless_of_content() {
        for len in [0usize, 1, 6, 512, MIN_AUDIO_BYTES - 1] {
            let payload = vec![0xAB; len];
            let encoded = encode(&payload);
            if encoded.is_empty() {
                continue;
            }
            assert_eq!(
                decode_base64_audio(&encoded),
                Err(IntakeError::TooSmall { len })
            );
        }
        // Short but valid base64 text
        assert_eq!(
            decode_base64_audio("hello123"),
            Err(IntakeError::TooSmall { len: 6 })
        );
    }

    #[test]
    fn test_exact_floor_is_accepted() {
        let payload = vec![1u8; MIN_AUDIO_BYTES];
        assert!(decode_base64_audio(&encode(&payload)).is_ok());
    }

    #[test]
    fn test_text_bytes_must_be_utf8() {
        let payload = vec![3u8; 2048];
        let encoded = encode(&payload);
        assert_eq!(decode_base64_text(encoded.as_bytes()).unwrap(), payload);

        let mut invalid = encoded.into_bytes();
        invalid[10] = 0xFF;
        assert_eq!(decode_base64_text(&invalid), Err(IntakeError::InvalidInputType));
        assert_eq!(decode_base64_text(b""), Err(IntakeError::EmptyInput));
    }

    #[test]
    fn test_non_string_json_values() {
        assert_eq!(decode_base64_value(None), Err(IntakeError::InvalidInputType));
        assert_eq!(
            decode_base64_value(Some(&Value::Null)),
            Err(IntakeError::InvalidInputType)
        );
        assert_eq!(
            decode_base64_value(Some(&json!(42))),
            Err(IntakeError::InvalidInputType)
        );
        assert_eq!(
            decode_base64_value(Some(&json!({"audio": "x"}))),
            Err(IntakeError::InvalidInputType)
        );
        assert_eq!(
            decode_base64_value(Some(&json!(""))),
            Err(IntakeError::EmptyInput)
        );
    }
}
