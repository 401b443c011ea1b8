//! Request-time diagnostics.
//!
//! A [`Diagnostic`] records one reason a request did not satisfy its schema.
//! Each one remembers the source location that first produced it, which is
//! logged alongside the message but never shown to clients.

use std::fmt;
use std::panic::Location;

use http::StatusCode;
use sieve_extract::ExtractionError;

use crate::ParamType;

/// Category of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A required parameter was absent from every source.
    Missing,
    /// A raw value could not be coerced to the declared type.
    InvalidType,
    /// A custom validator rejected a value.
    ValidationFailed,
    /// The request sources could not be decoded.
    Extraction,
}

/// One request-time failure.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    message: String,
    param: Option<String>,
    raw: Option<String>,
    status: StatusCode,
    location: &'static Location<'static>,
}

impl Diagnostic {
    #[track_caller]
    fn new(
        kind: DiagnosticKind,
        message: String,
        param: Option<&str>,
        raw: Option<&str>,
        status: StatusCode,
    ) -> Self {
        Self {
            kind,
            message,
            param: param.map(str::to_string),
            raw: raw.map(str::to_string),
            status,
            location: Location::caller(),
        }
    }

    /// A required parameter is absent.
    #[must_use]
    #[track_caller]
    pub fn missing(param: &str) -> Self {
        Self::new(
            DiagnosticKind::Missing,
            format!("missing {param:?}"),
            Some(param),
            None,
            StatusCode::BAD_REQUEST,
        )
    }

    /// A raw value is not a valid `expected`.
    #[must_use]
    #[track_caller]
    pub fn invalid_type(param: &str, raw: &str, expected: ParamType) -> Self {
        let noun = match expected {
            ParamType::String => "a string",
            ParamType::Int => "an integer",
            ParamType::Float => "a float",
            ParamType::Bool => "a bool",
        };
        Self::new(
            DiagnosticKind::InvalidType,
            format!("{raw:?} is not {noun} (arg:{param})"),
            Some(param),
            Some(raw),
            StatusCode::BAD_REQUEST,
        )
    }

    /// A validator rejected `raw` with `reason`.
    #[must_use]
    #[track_caller]
    pub fn validation_failed(param: &str, raw: &str, reason: &str) -> Self {
        Self::new(
            DiagnosticKind::ValidationFailed,
            format!("{raw:?}: {reason} (arg:{param})"),
            Some(param),
            Some(raw),
            StatusCode::BAD_REQUEST,
        )
    }

    /// The request could not be decoded.
    #[must_use]
    #[track_caller]
    pub fn extraction(err: &ExtractionError) -> Self {
        Self::new(
            DiagnosticKind::Extraction,
            err.message().to_string(),
            None,
            None,
            err.status_code(),
        )
    }

    /// Returns the category.
    #[must_use]
    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    /// Returns the client-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the parameter this diagnostic is about, if any.
    #[must_use]
    pub fn param(&self) -> Option<&str> {
        self.param.as_deref()
    }

    /// Returns the offending raw value, if any.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Returns the HTTP status this diagnostic calls for.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    /// Returns where the diagnostic was produced.
    #[must_use]
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing() {
        let diag = Diagnostic::missing("q");
        assert_eq!(diag.kind(), DiagnosticKind::Missing);
        assert_eq!(diag.message(), r#"missing "q""#);
        assert_eq!(diag.param(), Some("q"));
        assert_eq!(diag.raw(), None);
        assert_eq!(diag.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_type_messages() {
        assert_eq!(
            Diagnostic::invalid_type("q", "0xZZ", ParamType::Int).to_string(),
            r#""0xZZ" is not an integer (arg:q)"#
        );
        assert_eq!(
            Diagnostic::invalid_type("x", "abc", ParamType::Float).to_string(),
            r#""abc" is not a float (arg:x)"#
        );
        assert_eq!(
            Diagnostic::invalid_type("v", "notabool", ParamType::Bool).to_string(),
            r#""notabool" is not a bool (arg:v)"#
        );
    }

    #[test]
    fn test_validation_failed() {
        let diag = Diagnostic::validation_failed("age", "-3", "must be positive");
        assert_eq!(diag.message(), r#""-3": must be positive (arg:age)"#);
        assert_eq!(diag.raw(), Some("-3"));
    }

    #[test]
    fn test_extraction_keeps_status() {
        let err = ExtractionError::unsupported_media_type("text/plain");
        let diag = Diagnostic::extraction(&err);

        assert_eq!(diag.kind(), DiagnosticKind::Extraction);
        assert_eq!(diag.message(), "invalid content-type 'text/plain'");
        assert_eq!(diag.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(diag.param(), None);
    }

    #[test]
    fn test_location_is_call_site() {
        let diag = Diagnostic::missing("q");
        assert!(diag.location().file().ends_with("diagnostic.rs"));
    }
}
