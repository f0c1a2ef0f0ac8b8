use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::value_objects::ImageFormat;

/// MIME names accepted in a data-URI style header.
const ALLOWED_MIME_HINTS: [&str; 4] = ["image/jpeg", "image/png", "image/jpg", "image/gif"];

/// Why an image payload was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageRejection {
    #[error("image.empty")]
    Empty,
    #[error("image.disallowed_type: {0}")]
    DisallowedType(String),
    #[error("image.decode_error: {0}")]
    Decode(String),
    #[error("image.too_large: max {limit} bytes")]
    TooLarge { limit: usize },
    #[error("image.invalid_format")]
    InvalidFormat,
}

/// Decoded image bytes whose format was confirmed by magic-byte sniffing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedImage {
    bytes: Vec<u8>,
    format: ImageFormat,
}

impl ValidatedImage {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ImageValidator {
    max_bytes: usize,
}

impl ImageValidator {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    /// Validates a base64 payload, optionally prefixed by a `data:<mime>;base64,` header.
    ///
    /// The header is only cross-checked against the allow-list; the sniffed
    /// magic bytes decide the format.
    pub fn validate(&self, payload: &str) -> Result<ValidatedImage, ImageRejection> {
        if payload.trim().is_empty() {
            return Err(ImageRejection::Empty);
        }

        let data = match payload.split_once(',') {
            Some((header, data)) => {
                let mime = declared_mime(header);
                if !ALLOWED_MIME_HINTS
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(mime))
                {
                    return Err(ImageRejection::DisallowedType(header.trim().to_string()));
                }
                data
            }
            None => payload,
        };

        let compact: String = data.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = STANDARD
            .decode(compact)
            .map_err(|e| ImageRejection::Decode(e.to_string()))?;

        self.validate_bytes(bytes)
    }

    /// Validates already-decoded bytes (size bound, then signature).
    pub fn validate_bytes(&self, bytes: Vec<u8>) -> Result<ValidatedImage, ImageRejection> {
        if bytes.is_empty() {
            return Err(ImageRejection::Empty);
        }
        if bytes.len() > self.max_bytes {
            return Err(ImageRejection::TooLarge {
                limit: self.max_bytes,
            });
        }
        let format = ImageFormat::sniff(&bytes).ok_or(ImageRejection::InvalidFormat)?;
        Ok(ValidatedImage { bytes, format })
    }
}

/// MIME type of a `data:<mime>;base64` header, `data:` prefix optional.
fn declared_mime(header: &str) -> &str {
    let header = header.trim();
    let header = header.strip_prefix("data:").unwrap_or(header);
    header
        .split_once(';')
        .map_or(header, |(mime, _)| mime)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::config::DEFAULT_MAX_IMAGE_BYTES;
    use proptest::prelude::*;

    const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn validator() -> ImageValidator {
        ImageValidator::new(DEFAULT_MAX_IMAGE_BYTES)
    }

    fn jpeg(len: usize) -> Vec<u8> {
        let mut bytes = vec![0xAB; len];
        bytes[0] = 0xFF;
        bytes[1] = 0xD8;
        bytes
    }

    #[test]
    fn should_reject_empty_payload() {
        assert_eq!(validator().validate("  "), Err(ImageRejection::Empty));
    }

    #[test]
    fn should_accept_plain_base64_jpeg() {
        let payload = STANDARD.encode(jpeg(64));
        let image = validator().validate(&payload).unwrap();
        assert_eq!(image.format(), ImageFormat::Jpeg);
        assert_eq!(image.bytes().len(), 64);
    }

    #[test]
    fn should_accept_data_uri_with_allowed_mime() {
        let mut bytes = PNG_HEADER.to_vec();
        bytes.extend_from_slice(&[0u8; 32]);
        let payload = format!("data:image/png;base64,{}", STANDARD.encode(&bytes));
        let image = validator().validate(&payload).unwrap();
        assert_eq!(image.format(), ImageFormat::Png);
    }

    #[test]
    fn should_reject_data_uri_with_disallowed_mime() {
        let payload = format!("data:image/webp;base64,{}", STANDARD.encode(jpeg(16)));
        assert!(matches!(
            validator().validate(&payload),
            Err(ImageRejection::DisallowedType(header)) if header == "data:image/webp;base64"
        ));
    }

    #[test]
    fn should_reject_mime_that_only_starts_with_allowed_type() {
        let payload = format!("data:image/pngx;base64,{}", STANDARD.encode(jpeg(16)));
        assert!(matches!(
            validator().validate(&payload),
            Err(ImageRejection::DisallowedType(header)) if header == "data:image/pngx;base64"
        ));
    }

    #[test]
    fn should_extract_mime_from_header() {
        assert_eq!(declared_mime(" data:image/gif;base64"), "image/gif");
        assert_eq!(declared_mime("image/jpg;base64"), "image/jpg");
        assert_eq!(declared_mime("data:image/png"), "image/png");
    }

    #[test]
    fn should_trust_magic_bytes_over_declared_mime() {
        let payload = format!("data:image/png;base64,{}", STANDARD.encode(jpeg(16)));
        let image = validator().validate(&payload).unwrap();
        assert_eq!(image.format(), ImageFormat::Jpeg);
    }

    #[test]
    fn should_report_decode_error_with_cause() {
        let result = validator().validate("not*base64!");
        assert!(matches!(result, Err(ImageRejection::Decode(cause)) if !cause.is_empty()));
    }

    #[test]
    fn should_ignore_line_breaks_in_payload() {
        let encoded = STANDARD.encode(jpeg(120));
        let (head, tail) = encoded.split_at(40);
        let payload = format!("{}\n{}", head, tail);
        assert!(validator().validate(&payload).is_ok());
    }

    #[test]
    fn should_reject_unknown_signature() {
        let payload = STANDARD.encode(b"BM not really a bitmap");
        assert_eq!(
            validator().validate(&payload),
            Err(ImageRejection::InvalidFormat)
        );
    }

    #[test]
    fn should_reject_header_without_data() {
        assert_eq!(
            validator().validate("data:image/jpeg;base64,"),
            Err(ImageRejection::Empty)
        );
    }

    #[test]
    fn should_reject_one_byte_over_limit() {
        let small = ImageValidator::new(1024);
        assert!(small.validate_bytes(jpeg(1024)).is_ok());
        assert_eq!(
            small.validate_bytes(jpeg(1025)),
            Err(ImageRejection::TooLarge { limit: 1024 })
        );
    }

    #[test]
    fn should_reject_six_megabyte_payload_citing_limit() {
        let payload = STANDARD.encode(jpeg(6 * 1024 * 1024));
        let err = validator().validate(&payload).unwrap_err();
        assert_eq!(
            err,
            ImageRejection::TooLarge {
                limit: DEFAULT_MAX_IMAGE_BYTES
            }
        );
        assert!(err.to_string().contains("5242880"));
    }

    fn signature() -> impl Strategy<Value = Vec<u8>> {
        prop_oneof![
            Just(vec![0xFF, 0xD8]),
            Just(PNG_HEADER.to_vec()),
            Just(b"GIF87a".to_vec()),
            Just(b"GIF89a".to_vec()),
        ]
    }

    proptest! {
        #[test]
        fn accepts_any_signed_image_within_limit(
            header in signature(),
            body in proptest::collection::vec(any::<u8>(), 0..4096),
        ) {
            let mut bytes = header;
            bytes.extend(body);
            let limit = bytes.len();
            prop_assert!(ImageValidator::new(limit).validate_bytes(bytes).is_ok());
        }

        #[test]
        fn rejects_oversized_streams_regardless_of_content(
            body in proptest::collection::vec(any::<u8>(), 1..2048),
            limit in 0usize..1024,
        ) {
            prop_assume!(body.len() > limit);
            let result = ImageValidator::new(limit).validate_bytes(body);
            prop_assert_eq!(result, Err(ImageRejection::TooLarge { limit }));
        }
    }
}
