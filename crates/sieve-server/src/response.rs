//! Response builders.
//!
//! | Builder | Content-Type |
//! |---------|--------------|
//! | [`JsonResponse`] | `application/json` |
//! | [`TextResponse`] | `text/plain; charset=utf-8` |
//! | [`ErrorResponse`] | `application/json` |

use bytes::Bytes;
use http::header::{self, HeaderValue};
use http::{Response, StatusCode};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

const JSON: &str = "application/json";
const TEXT: &str = "text/plain; charset=utf-8";

fn build(status: StatusCode, content_type: &'static str, body: impl Into<Bytes>) -> Response<Bytes> {
    let mut response = Response::new(body.into());
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

/// JSON response builder.
///
/// # Example
///
/// ```rust
/// use sieve_server::JsonResponse;
///
/// let response = JsonResponse::new(serde_json::json!({"ok": true})).into_response();
/// assert_eq!(response.status(), http::StatusCode::OK);
/// assert_eq!(&response.body()[..], br#"{"ok":true}"#);
/// ```
#[derive(Debug, Clone)]
pub struct JsonResponse<T> {
    data: T,
    status: StatusCode,
    pretty: bool,
}

impl<T: Serialize> JsonResponse<T> {
    /// Creates a `200 OK` JSON response.
    #[must_use]
    pub fn new(data: T) -> Self {
        Self {
            data,
            status: StatusCode::OK,
            pretty: false,
        }
    }

    /// Sets the status code.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Indents the body by four spaces.
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the data.
    #[must_use]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Builds the response.
    ///
    /// A value that cannot be serialized yields a `500` error response.
    #[must_use]
    pub fn into_response(self) -> Response<Bytes> {
        match self.to_vec() {
            Ok(body) => build(self.status, JSON, body),
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize response");
                ErrorResponse::internal("response serialization failed").into_response()
            }
        }
    }

    fn to_vec(&self) -> serde_json::Result<Vec<u8>> {
        if !self.pretty {
            return serde_json::to_vec(&self.data);
        }
        let mut out = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
        self.data.serialize(&mut serializer)?;
        Ok(out)
    }
}

/// Plain text response builder.
///
/// ```rust
/// use sieve_server::TextResponse;
///
/// let response = TextResponse::new("pong").into_response();
/// assert_eq!(&response.body()[..], b"pong");
/// ```
#[derive(Debug, Clone)]
pub struct TextResponse {
    body: String,
    status: StatusCode,
}

impl TextResponse {
    /// Creates a `200 OK` text response.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            status: StatusCode::OK,
        }
    }

    /// Sets the status code.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Builds the response.
    #[must_use]
    pub fn into_response(self) -> Response<Bytes> {
        build(self.status, TEXT, self.body)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: &'a str,
}

/// JSON error response with a stable code.
///
/// The body is `{"code": "...", "message": "..."}`.
///
/// ```rust
/// use sieve_server::ErrorResponse;
///
/// let response = ErrorResponse::not_found("/nowhere").into_response();
/// assert_eq!(response.status(), http::StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Clone)]
pub struct ErrorResponse {
    status: StatusCode,
    code: String,
    message: String,
}

impl ErrorResponse {
    /// Creates an error response.
    #[must_use]
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// `404` for a path no route covers.
    #[must_use]
    pub fn not_found(path: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", format!("no route for {path}"))
    }

    /// `501` for an endpoint without an implementation.
    #[must_use]
    pub fn not_implemented() -> Self {
        Self::new(StatusCode::NOT_IMPLEMENTED, "NOT_IMPLEMENTED", "Not Implemented")
    }

    /// `500` for a handler failure.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the error code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Builds the response.
    #[must_use]
    pub fn into_response(self) -> Response<Bytes> {
        let body = ErrorBody {
            code: &self.code,
            message: &self.message,
        };
        // Two string fields always serialize.
        let bytes = serde_json::to_vec(&body).unwrap_or_default();
        build(self.status, JSON, bytes)
    }
}
