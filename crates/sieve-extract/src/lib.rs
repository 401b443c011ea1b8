//! # Sieve Extract
//!
//! Multi-source request value extraction for the Sieve argument engine.
//!
//! One request carries named values in several places. This crate collects
//! them into a single [`ExtractedValues`] map under a fixed precedence:
//!
//! | Source | Priority | Notes |
//! |--------|----------|-------|
//! | `Cookie` headers | lowest | one value per cookie, never fails |
//! | Body | middle | `POST`/`PUT`/`PATCH` only, chosen by `Content-Type` |
//! | Query string | highest | repeated keys accumulate, never fails |
//! | Trailing `key=value` path segments | fill-in | only names no other source set |
//!
//! Supported bodies are `application/json` (flat object),
//! `application/x-www-form-urlencoded` and `multipart/form-data`. A missing
//! `Content-Type` is decoded as a url-encoded form.
//!
//! ## Example
//!
//! ```rust
//! use sieve_extract::{extract, path_segments, ExtractConfig, ExtractionContextBuilder};
//! use http::{Method, Uri};
//!
//! let ctx = ExtractionContextBuilder::new()
//!     .method(Method::GET)
//!     .uri(Uri::from_static("/api/users/42?verbose=1&tag=a&tag=b"))
//!     .build();
//!
//! let values = extract(&ctx, "/api/users", &ExtractConfig::default()).unwrap();
//! assert_eq!(values.get("tag").map(<[String]>::len), Some(2));
//! assert_eq!(path_segments(ctx.path(), "/api/users"), vec!["42"]);
//! ```
//!
//! ## Error Handling
//!
//! Only the body can fail. [`ExtractionError`] carries the failing source, a
//! message, an HTTP status and a stable error code:
//!
//! ```rust
//! use sieve_extract::ExtractionError;
//!
//! let err = ExtractionError::payload_too_large(1024, 4096);
//! assert_eq!(err.status_code(), http::StatusCode::PAYLOAD_TOO_LARGE);
//! assert_eq!(err.error_code(), "PAYLOAD_TOO_LARGE");
//! ```

#![doc(html_root_url = "https://docs.rs/sieve-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
mod cookie;
mod error;
mod extractor;
mod form;
mod json;
mod multipart;
mod path;
mod query;
mod values;

pub use context::{ExtractionContext, ExtractionContextBuilder};
pub use cookie::cookie_values;
pub use error::{ExtractionError, ExtractionSource};
pub use extractor::{
    extract, ExtractConfig, DEFAULT_MAX_BODY_SIZE, DEFAULT_MAX_MULTIPART_FIELDS,
    DEFAULT_MAX_MULTIPART_SIZE,
};
pub use path::{canonical_route, path_segments, route_suffix};
pub use query::query_values;
pub use values::ExtractedValues;
