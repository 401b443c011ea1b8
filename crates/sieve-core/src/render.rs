//! Usage and error documents.
//!
//! The help view and the error view are the same document: the error view
//! only adds the `err` list.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::{Diagnostic, ParamType, Scalar, Schema};

/// Descriptor of one declared parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgDoc {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub param_type: ParamType,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// Default value, for optional parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Scalar>,
    /// Method restriction, when the parameter does not apply to every method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methods: Option<String>,
    /// The validator's self-description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub memo: String,
}

/// Machine-readable usage document for one route.
///
/// # Example
///
/// ```rust
/// use sieve_core::{ParamSpec, ParamType, Schema};
///
/// let schema = Schema::compile(
///     "/search",
///     vec![
///         ParamSpec::purpose("full-text search"),
///         ParamSpec::new("q").required().memo("query text"),
///         ParamSpec::new("limit").of_type(ParamType::Int).default_value(10),
///     ],
/// )
/// .unwrap();
///
/// let doc = schema.render(&[]);
/// assert_eq!(doc.purpose, "full-text search");
/// assert_eq!(doc.uri, "/search?[limit]&<q>");
/// assert_eq!(doc.args[0].name, "limit");
/// assert!(doc.errors.is_none());
///
/// let json = doc.to_json();
/// assert_eq!(json["arg"][1]["memo"], "query text");
/// assert!(json.get("err").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageDoc {
    /// The schema's purpose text.
    #[serde(rename = "for")]
    pub purpose: String,
    /// Canonical usage string.
    pub uri: String,
    /// Parameter descriptors, ordered by name.
    #[serde(rename = "arg")]
    pub args: Vec<ArgDoc>,
    /// Diagnostic messages; present only on error.
    #[serde(rename = "err", default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl UsageDoc {
    /// Returns true if this is an error document.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.errors.is_some()
    }

    /// Converts the document to a JSON value.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for UsageDoc {
    /// Writes JSON indented by four spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&out))
    }
}

impl Schema {
    /// Renders the usage document, with `diagnostics` as its error list.
    ///
    /// With no diagnostics the result is the help view.
    #[must_use]
    pub fn render(&self, diagnostics: &[Diagnostic]) -> UsageDoc {
        let mut args: Vec<ArgDoc> = self
            .params()
            .map(|param| ArgDoc {
                name: param.name().to_string(),
                param_type: param.param_type(),
                required: param.required(),
                default: (!param.required()).then(|| param.default().clone()),
                methods: (!param.methods().is_all()).then(|| param.methods().to_string()),
                check: param.validator().and_then(crate::Validator::describe),
                memo: param.memo().to_string(),
            })
            .collect();
        args.sort_by(|a, b| a.name.cmp(&b.name));

        let errors = (!diagnostics.is_empty())
            .then(|| diagnostics.iter().map(|d| d.message().to_string()).collect());

        UsageDoc {
            purpose: self.purpose().to_string(),
            uri: self.usage(),
            args,
            errors,
        }
    }

    /// Renders the help view.
    #[must_use]
    pub fn help(&self) -> UsageDoc {
        self.render(&[])
    }
}
