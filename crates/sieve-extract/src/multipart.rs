//! Multipart form body source.
//!
//! Only text fields contribute values; file parts are skipped. The body is
//! already buffered, so the `multer` stream is driven to completion on the
//! calling thread.

use std::io;

use bytes::Bytes;
use futures_executor::block_on;

use crate::{ExtractedValues, ExtractionError, ExtractionSource};

/// Limits applied while reading a multipart body.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MultipartLimits {
    pub(crate) max_size: usize,
    pub(crate) max_fields: usize,
}

/// Decodes a `multipart/form-data` body.
///
/// `content_type` is the raw header value, which carries the boundary.
pub(crate) fn multipart_values(
    content_type: &str,
    body: &Bytes,
    limits: MultipartLimits,
) -> Result<ExtractedValues, ExtractionError> {
    let boundary = multer::parse_boundary(content_type).map_err(|_| {
        ExtractionError::malformed(
            ExtractionSource::ContentType,
            "missing or invalid boundary in multipart Content-Type",
        )
    })?;

    if body.len() > limits.max_size {
        return Err(ExtractionError::payload_too_large(limits.max_size, body.len()));
    }

    let body = body.clone();
    let stream = futures_util::stream::once(async move { Ok::<_, io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    block_on(async move {
        let mut pairs = Vec::new();
        let mut field_count = 0;

        while let Some(field) = multipart.next_field().await.map_err(malformed)? {
            field_count += 1;
            if field_count > limits.max_fields {
                return Err(ExtractionError::malformed(
                    ExtractionSource::Body,
                    format!("too many multipart fields (max {})", limits.max_fields),
                ));
            }

            if field.file_name().is_some() {
                continue;
            }
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let text = field.text().await.map_err(malformed)?;
            pairs.push((name, text));
        }

        Ok(crate::values::group_pairs(pairs))
    })
}

fn malformed(err: multer::Error) -> ExtractionError {
    ExtractionError::malformed(ExtractionSource::Body, format!("multipart: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    const BOUNDARY: &str = "X-BOUNDARY";

    fn content_type() -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    fn limits() -> MultipartLimits {
        MultipartLimits {
            max_size: 64 * 1024,
            max_fields: 10,
        }
    }

    fn text_part(name: &str, value: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
    }

    fn file_part(name: &str, filename: &str, value: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: text/plain\r\n\r\n{value}\r\n"
        )
    }

    fn body(parts: &[String]) -> Bytes {
        Bytes::from(format!("{}--{BOUNDARY}--\r\n", parts.concat()))
    }

    #[test]
    fn test_text_fields() {
        let body = body(&[
            text_part("title", "hello"),
            text_part("tag", "a"),
            text_part("tag", "b"),
        ]);
        let values = multipart_values(&content_type(), &body, limits()).unwrap();

        assert_eq!(values.get("title"), Some(&["hello".to_string()][..]));
        assert_eq!(
            values.get("tag"),
            Some(&["a".to_string(), "b".to_string()][..])
        );
    }

    #[test]
    fn test_file_parts_skipped() {
        let body = body(&[
            text_part("title", "doc"),
            file_part("upload", "notes.txt", "file contents"),
        ]);
        let values = multipart_values(&content_type(), &body, limits()).unwrap();

        assert!(values.contains("title"));
        assert!(!values.contains("upload"));
    }

    #[test]
    fn test_missing_boundary() {
        let body = body(&[text_part("a", "1")]);
        let err = multipart_values("multipart/form-data", &body, limits()).unwrap_err();
        assert_eq!(err.extraction_source(), ExtractionSource::ContentType);
    }

    #[test]
    fn test_too_large() {
        let body = body(&[text_part("a", &"x".repeat(128))]);
        let small = MultipartLimits {
            max_size: 64,
            max_fields: 10,
        };
        let err = multipart_values(&content_type(), &body, small).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_too_many_fields() {
        let parts: Vec<String> = (0..3).map(|i| text_part(&format!("f{i}"), "v")).collect();
        let few = MultipartLimits {
            max_size: 64 * 1024,
            max_fields: 2,
        };
        let err = multipart_values(&content_type(), &body(&parts), few).unwrap_err();
        assert!(err.message().contains("too many multipart fields"));
    }

    #[test]
    fn test_truncated_body() {
        let body = Bytes::from(format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\nunterminated"
        ));
        let err = multipart_values(&content_type(), &body, limits()).unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_BODY");
    }
}
