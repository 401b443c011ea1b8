//! Query string source.

use crate::values::group_pairs;
use crate::ExtractedValues;

/// Decodes a URL-encoded string into grouped values.
///
/// Decoding is lenient: `serde_urlencoded` yields pairs for every
/// `&`-separated entry, so a query string never fails to parse.
pub(crate) fn decode(input: &str) -> ExtractedValues {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(input).unwrap_or_default();
    group_pairs(pairs)
}

/// Parses a raw query string into a value map.
///
/// Repeated keys accumulate in order (`?id=1&id=2` yields `["1", "2"]`), and
/// a key without `=` is present with an empty value.
///
/// # Example
///
/// ```rust
/// use sieve_extract::query_values;
///
/// let values = query_values("q=rust+lang&id=1&id=2&verbose");
/// assert_eq!(values.get("q"), Some(&["rust lang".to_string()][..]));
/// assert_eq!(values.get("id").map(<[String]>::len), Some(2));
/// assert_eq!(values.get("verbose"), Some(&[String::new()][..]));
/// ```
#[must_use]
pub fn query_values(query: &str) -> ExtractedValues {
    decode(query)
}
