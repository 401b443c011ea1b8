//! Multi-source value extraction.
//!
//! [`extract`] merges every source of one request into a single
//! [`ExtractedValues`] map. Sources are applied lowest priority first, and a
//! later source replaces the whole entry for a name:
//!
//! 1. cookies
//! 2. body (`POST`, `PUT` and `PATCH` only)
//! 3. query string
//!
//! Trailing `key=value` path segments after the route are added last, but
//! only for names that no other source provided.

use serde::{Deserialize, Serialize};

use crate::cookie::cookie_values;
use crate::form::form_values;
use crate::json::json_values;
use crate::multipart::{multipart_values, MultipartLimits};
use crate::path::{route_suffix, suffix_values};
use crate::query::query_values;
use crate::{ExtractedValues, ExtractionContext, ExtractionError};

/// Default maximum JSON or url-encoded body size (1 MiB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Default maximum multipart body size (10 MiB).
pub const DEFAULT_MAX_MULTIPART_SIZE: usize = 10 * 1024 * 1024;

/// Default maximum number of multipart fields.
pub const DEFAULT_MAX_MULTIPART_FIELDS: usize = 100;

/// Limits applied while decoding request bodies.
///
/// # Example
///
/// ```rust
/// use sieve_extract::ExtractConfig;
///
/// let config = ExtractConfig::default().max_body_size(64 * 1024);
/// assert_eq!(config.max_body_size, 64 * 1024);
/// assert_eq!(config.max_multipart_size, 10 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    /// Maximum size of a JSON or url-encoded body in bytes.
    pub max_body_size: usize,
    /// Maximum size of a multipart body in bytes.
    pub max_multipart_size: usize,
    /// Maximum number of multipart fields.
    pub max_multipart_fields: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            max_multipart_size: DEFAULT_MAX_MULTIPART_SIZE,
            max_multipart_fields: DEFAULT_MAX_MULTIPART_FIELDS,
        }
    }
}

impl ExtractConfig {
    /// Creates a configuration with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum JSON or url-encoded body size.
    #[must_use]
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    /// Sets the maximum multipart body size.
    #[must_use]
    pub fn max_multipart_size(mut self, size: usize) -> Self {
        self.max_multipart_size = size;
        self
    }

    /// Sets the maximum number of multipart fields.
    #[must_use]
    pub fn max_multipart_fields(mut self, count: usize) -> Self {
        self.max_multipart_fields = count;
        self
    }
}

/// Decodes the request body according to its content type.
///
/// A missing `Content-Type` falls back to url-encoded form decoding.
fn body_values(
    ctx: &ExtractionContext,
    config: &ExtractConfig,
) -> Result<ExtractedValues, ExtractionError> {
    let Some(raw) = ctx.content_type() else {
        return form_values(ctx.body(), config.max_body_size);
    };

    let media: mime::Mime = raw
        .parse()
        .map_err(|_| ExtractionError::unsupported_media_type(raw))?;

    match media.essence_str() {
        "application/json" => json_values(ctx.body(), config.max_body_size),
        "multipart/form-data" => multipart_values(
            raw,
            ctx.body(),
            MultipartLimits {
                max_size: config.max_multipart_size,
                max_fields: config.max_multipart_fields,
            },
        ),
        "application/x-www-form-urlencoded" => form_values(ctx.body(), config.max_body_size),
        _ => Err(ExtractionError::unsupported_media_type(media.essence_str())),
    }
}

/// Extracts and merges the named values of one request.
///
/// `route` is the prefix the request was routed on; trailing segments after
/// it may carry `key=value` pairs. Cookie and query parsing never fail; a
/// body that cannot be decoded aborts extraction.
///
/// # Example
///
/// ```rust
/// use sieve_extract::{extract, ExtractConfig, ExtractionContextBuilder};
/// use http::{Method, Uri};
///
/// let ctx = ExtractionContextBuilder::new()
///     .method(Method::POST)
///     .uri(Uri::from_static("/search?q=query"))
///     .header("cookie", "q=cookie; theme=dark")
///     .header("content-type", "application/x-www-form-urlencoded")
///     .body("q=body&page=2")
///     .build();
///
/// let values = extract(&ctx, "/search", &ExtractConfig::default()).unwrap();
/// assert_eq!(values.get("q"), Some(&["query".to_string()][..]));
/// assert_eq!(values.get("page"), Some(&["2".to_string()][..]));
/// assert_eq!(values.get("theme"), Some(&["dark".to_string()][..]));
/// ```
///
/// # Errors
///
/// Returns an [`ExtractionError`] for a malformed or oversized body, or for
/// an unsupported content type on a body-bearing method.
pub fn extract(
    ctx: &ExtractionContext,
    route: &str,
    config: &ExtractConfig,
) -> Result<ExtractedValues, ExtractionError> {
    let mut values = cookie_values(ctx);
    let cookie_count = values.len();

    let mut body_count = 0;
    if ctx.has_body_method() {
        let body = body_values(ctx, config).map_err(|err| {
            tracing::warn!(
                http.method = %ctx.method(),
                http.path = ctx.path(),
                error_code = err.error_code(),
                error = %err,
                "request body rejected"
            );
            err
        })?;
        body_count = body.len();
        values.overlay(body);
    }

    let mut query_count = 0;
    if let Some(query) = ctx.query_string() {
        let query = query_values(query);
        query_count = query.len();
        values.overlay(query);
    }

    if let Some(suffix) = route_suffix(ctx.path(), route) {
        for (name, found) in suffix_values(suffix).iter() {
            values.set_if_absent(name, found.to_vec());
        }
    }

    tracing::debug!(
        http.method = %ctx.method(),
        http.path = ctx.path(),
        cookies = cookie_count,
        body = body_count,
        query = query_count,
        total = values.len(),
        "extracted request values"
    );

    Ok(values)
}
