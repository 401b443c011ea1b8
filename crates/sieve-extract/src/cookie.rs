//! Cookie source.
//!
//! Cookies are the lowest-priority source of named values. Parsing never
//! fails: malformed pairs and non-UTF-8 headers are skipped.

use crate::{ExtractedValues, ExtractionContext};

/// Parses one `Cookie` header value into `(name, value)` pairs.
fn parse_header(header_value: &str) -> impl Iterator<Item = (&str, &str)> {
    header_value.split(';').filter_map(|cookie| {
        let (name, value) = cookie.trim().split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        // Remove surrounding quotes if present
        Some((name, value.trim().trim_matches('"')))
    })
}

/// Collects all request cookies into a value map.
///
/// Each cookie contributes exactly one value; when a name repeats, the last
/// occurrence wins.
///
/// # Example
///
/// ```rust
/// use sieve_extract::{cookie_values, ExtractionContext};
/// use http::{HeaderMap, HeaderValue, Method, Uri};
/// use bytes::Bytes;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(
///     http::header::COOKIE,
///     HeaderValue::from_static("session=abc123; theme=dark"),
/// );
///
/// let ctx = ExtractionContext::new(Method::GET, Uri::from_static("/"), headers, Bytes::new());
/// let values = cookie_values(&ctx);
///
/// assert_eq!(values.get("session"), Some(&["abc123".to_string()][..]));
/// assert_eq!(values.get("theme"), Some(&["dark".to_string()][..]));
/// ```
#[must_use]
pub fn cookie_values(ctx: &ExtractionContext) -> ExtractedValues {
    let mut values = ExtractedValues::new();
    for header_value in ctx.cookie_headers() {
        for (name, value) in parse_header(header_value) {
            values.set(name, vec![value.to_string()]);
        }
    }
    values
}
