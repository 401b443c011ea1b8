//! Route prefix matching and trailing path segments.
//!
//! Routes are canonical (no trailing `/`, the root route is `""`). Whatever
//! follows the route in the request path is the suffix: its segments feed
//! positional parameters, and `key=value` segments are also offered as named
//! values at the lowest priority.

use std::borrow::Cow;

use crate::query::decode;
use crate::ExtractedValues;

/// Canonicalizes a route by stripping trailing separators.
///
/// # Example
///
/// ```rust
/// use sieve_extract::canonical_route;
///
/// assert_eq!(canonical_route("/api/find/"), "/api/find");
/// assert_eq!(canonical_route("/"), "");
/// ```
#[must_use]
pub fn canonical_route(route: &str) -> &str {
    route.trim_end_matches('/')
}

/// Returns the part of `path` after `route`, without its leading separator.
///
/// Returns `None` when the path is not under the route on a segment
/// boundary (`/api/findings` is not under `/api/find`).
///
/// # Example
///
/// ```rust
/// use sieve_extract::route_suffix;
///
/// assert_eq!(route_suffix("/api/find/42/x", "/api/find"), Some("42/x"));
/// assert_eq!(route_suffix("/api/find", "/api/find"), Some(""));
/// assert_eq!(route_suffix("/api/findings", "/api/find"), None);
/// ```
#[must_use]
pub fn route_suffix<'a>(path: &'a str, route: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(canonical_route(route))?;
    if rest.is_empty() {
        return Some("");
    }
    rest.strip_prefix('/')
}

/// Splits the route suffix of `path` into percent-decoded segments.
///
/// An empty suffix yields no segments. Segments that do not decode to UTF-8
/// are kept as sent.
///
/// # Example
///
/// ```rust
/// use sieve_extract::path_segments;
///
/// assert_eq!(path_segments("/files/a%20b/c", "/files"), vec!["a b", "c"]);
/// assert!(path_segments("/files", "/files").is_empty());
/// ```
#[must_use]
pub fn path_segments(path: &str, route: &str) -> Vec<String> {
    match route_suffix(path, route) {
        Some(suffix) if !suffix.is_empty() => suffix
            .split('/')
            .map(|segment| {
                urlencoding::decode(segment)
                    .unwrap_or(Cow::Borrowed(segment))
                    .into_owned()
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Decodes `key=value` segments of a route suffix into named values.
///
/// Keys are reduced to their last path component, so `sub/dir/page=2`
/// yields `page = ["2"]`.
pub(crate) fn suffix_values(suffix: &str) -> ExtractedValues {
    let mut values = ExtractedValues::new();
    if suffix.is_empty() {
        return values;
    }
    for (key, found) in decode(suffix).iter() {
        let base = key.rsplit('/').next().unwrap_or(key);
        if !base.is_empty() {
            values.set_if_absent(base, found.to_vec());
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_route() {
        assert_eq!(canonical_route("/a"), "/a");
        assert_eq!(canonical_route("/a//"), "/a");
        assert_eq!(canonical_route(""), "");
    }

    #[test]
    fn test_route_suffix_root() {
        assert_eq!(route_suffix("/x/y", "/"), Some("x/y"));
        assert_eq!(route_suffix("/", "/"), Some(""));
    }

    #[test]
    fn test_route_suffix_trailing_slash_route() {
        assert_eq!(route_suffix("/api/find/1", "/api/find/"), Some("1"));
    }

    #[test]
    fn test_route_suffix_mismatch() {
        assert_eq!(route_suffix("/other", "/api"), None);
    }

    #[test]
    fn test_segments_exclude_leading_separator() {
        assert_eq!(path_segments("/find/a/b", "/find"), vec!["a", "b"]);
    }

    #[test]
    fn test_segments_keep_trailing_empty() {
        assert_eq!(path_segments("/find/a/", "/find"), vec!["a", ""]);
    }

    #[test]
    fn test_segments_outside_route() {
        assert!(path_segments("/elsewhere/a", "/find").is_empty());
    }

    #[test]
    fn test_suffix_key_value() {
        let values = suffix_values("limit=5");
        assert_eq!(values.get("limit"), Some(&["5".to_string()][..]));
    }

    #[test]
    fn test_suffix_uses_last_component() {
        let values = suffix_values("sub/dir/page=2");
        assert_eq!(values.get("page"), Some(&["2".to_string()][..]));
        assert!(!values.contains("sub/dir/page"));
    }

    #[test]
    fn test_suffix_bare_segment() {
        let values = suffix_values("verbose");
        assert_eq!(values.get("verbose"), Some(&[String::new()][..]));
    }

    #[test]
    fn test_suffix_empty() {
        assert!(suffix_values("").is_empty());
    }
}
