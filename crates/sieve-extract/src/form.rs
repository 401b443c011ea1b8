//! URL-encoded form body source.

use bytes::Bytes;

use crate::values::group_pairs;
use crate::{ExtractedValues, ExtractionError, ExtractionSource};

/// Decodes an `application/x-www-form-urlencoded` body.
///
/// Every form field becomes one entry; repeated fields accumulate in order.
/// An empty body yields no values.
pub(crate) fn form_values(body: &Bytes, max_size: usize) -> Result<ExtractedValues, ExtractionError> {
    if body.len() > max_size {
        return Err(ExtractionError::payload_too_large(max_size, body.len()));
    }

    if body.is_empty() {
        return Ok(ExtractedValues::new());
    }

    let body_str = std::str::from_utf8(body).map_err(|e| {
        ExtractionError::malformed(ExtractionSource::Body, format!("invalid UTF-8: {e}"))
    })?;

    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(body_str)
        .map_err(|e| ExtractionError::malformed(ExtractionSource::Body, e.to_string()))?;

    Ok(group_pairs(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    const LIMIT: usize = 1024;

    #[test]
    fn test_form_fields() {
        let body = Bytes::from_static(b"username=alice&tags=a&tags=b&query=hello+world");
        let values = form_values(&body, LIMIT).unwrap();

        assert_eq!(values.get("username"), Some(&["alice".to_string()][..]));
        assert_eq!(
            values.get("tags"),
            Some(&["a".to_string(), "b".to_string()][..])
        );
        assert_eq!(values.get("query"), Some(&["hello world".to_string()][..]));
    }

    #[test]
    fn test_empty_form() {
        let values = form_values(&Bytes::new(), LIMIT).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_form_too_large() {
        let body = Bytes::from(vec![b'a'; LIMIT + 1]);
        let err = form_values(&body, LIMIT).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_form_invalid_utf8() {
        let body = Bytes::from_static(&[b'a', b'=', 0xFF, 0xFE]);
        let err = form_values(&body, LIMIT).unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_BODY");
        assert!(err.message().contains("invalid UTF-8"));
    }
}
