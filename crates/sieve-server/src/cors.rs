//! Cross-origin headers.
//!
//! [`Cors`] adds the `Access-Control-Allow-*` headers to every response and
//! answers `OPTIONS` preflight requests itself with `200 OK`.
//!
//! ```rust
//! use http::Method;
//! use sieve_server::Cors;
//!
//! let cors = Cors::permissive();
//! let preflight = cors.preflight(&Method::OPTIONS).unwrap();
//! assert_eq!(preflight.headers()["access-control-allow-origin"], "*");
//! assert!(cors.preflight(&Method::GET).is_none());
//! ```

use bytes::Bytes;
use http::header::{self, HeaderName, HeaderValue};
use http::{Method, Response, StatusCode};

/// Default `Access-Control-Allow-Methods`.
pub const DEFAULT_ALLOW_METHODS: &str = "DELETE, POST, GET, OPTIONS";

/// Default `Access-Control-Allow-Headers`.
pub const DEFAULT_ALLOW_HEADERS: &str =
    "Content-Type, Access-Control-Allow-Headers, Authorization, X-Requested-With";

/// CORS header injector.
#[derive(Debug, Clone)]
pub struct Cors {
    allow_origin: HeaderValue,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
}

impl Default for Cors {
    fn default() -> Self {
        Self::permissive()
    }
}

impl Cors {
    /// Any origin, the common methods and the common request headers.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            allow_origin: HeaderValue::from_static("*"),
            allow_methods: HeaderValue::from_static(DEFAULT_ALLOW_METHODS),
            allow_headers: HeaderValue::from_static(DEFAULT_ALLOW_HEADERS),
        }
    }

    /// Restricts the allowed origin.
    ///
    /// An origin that is not a valid header value leaves the setting unchanged.
    #[must_use]
    pub fn allow_origin(mut self, origin: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(origin) {
            self.allow_origin = value;
        }
        self
    }

    /// Sets the allowed methods.
    #[must_use]
    pub fn allow_methods<I>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = Method>,
    {
        let list = methods
            .into_iter()
            .map(|m| m.as_str().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        if let Ok(value) = HeaderValue::from_str(&list) {
            self.allow_methods = value;
        }
        self
    }

    /// Sets the allowed request headers.
    #[must_use]
    pub fn allow_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let list = headers
            .into_iter()
            .map(|h| h.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        if let Ok(value) = HeaderValue::from_str(&list) {
            self.allow_headers = value;
        }
        self
    }

    /// Adds the CORS headers to `response`.
    pub fn apply(&self, response: &mut Response<Bytes>) {
        let headers = response.headers_mut();
        for (name, value) in self.pairs() {
            headers.insert(name, value.clone());
        }
    }

    /// Answers a preflight request, or returns `None` for other methods.
    #[must_use]
    pub fn preflight(&self, method: &Method) -> Option<Response<Bytes>> {
        if *method != Method::OPTIONS {
            return None;
        }
        let mut response = Response::new(Bytes::new());
        *response.status_mut() = StatusCode::OK;
        self.apply(&mut response);
        Some(response)
    }

    fn pairs(&self) -> [(HeaderName, &HeaderValue); 3] {
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, &self.allow_origin),
            (header::ACCESS_CONTROL_ALLOW_METHODS, &self.allow_methods),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, &self.allow_headers),
        ]
    }
}
