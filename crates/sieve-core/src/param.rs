//! Parameter declarations.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{ParamType, Scalar};

type CheckFn = dyn Fn(Option<&Scalar>) -> Result<(), String> + Send + Sync;

/// Custom check applied to each coerced value of a parameter.
///
/// The check receives `Some(value)` for a real value. Called with `None`, it
/// should return an error describing what it accepts; that message becomes
/// the parameter's `check` text in the usage document.
///
/// # Example
///
/// ```rust
/// use sieve_core::{Scalar, Validator};
///
/// let positive = Validator::new(|value| match value {
///     Some(Scalar::Int(n)) if *n > 0 => Ok(()),
///     _ => Err("must be a positive integer".to_string()),
/// });
///
/// assert!(positive.check(Some(&Scalar::Int(3))).is_ok());
/// assert!(positive.check(Some(&Scalar::Int(-1))).is_err());
/// assert_eq!(positive.describe().as_deref(), Some("must be a positive integer"));
/// ```
#[derive(Clone)]
pub struct Validator(Arc<CheckFn>);

impl Validator {
    /// Wraps a check function.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(Option<&Scalar>) -> Result<(), String> + Send + Sync + 'static,
    {
        Self(Arc::new(check))
    }

    /// Runs the check against one value.
    pub fn check(&self, value: Option<&Scalar>) -> Result<(), String> {
        (self.0)(value)
    }

    /// Probes the check with no value and returns its self-description.
    #[must_use]
    pub fn describe(&self) -> Option<String> {
        self.check(None).err()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Validator").finish_non_exhaustive()
    }
}

/// Declaration of one expected parameter.
///
/// Declarations are plain data and deserialize from configuration files;
/// validators can only be attached in code.
///
/// # Example
///
/// ```rust
/// use sieve_core::{ParamSpec, ParamType};
///
/// let spec = ParamSpec::new("limit")
///     .of_type(ParamType::Int)
///     .default_value(20)
///     .methods("GET")
///     .memo("page size");
///
/// assert_eq!(spec.name, "limit");
/// assert_eq!(spec.type_name, "int");
/// assert!(!spec.required);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParamSpec {
    /// Unique name. The empty name marks the purpose entry.
    pub name: String,
    /// Type name (`string`, `int`, `float`, `bool`; case-insensitive).
    #[serde(rename = "type")]
    pub type_name: String,
    /// Default used when the parameter is optional and absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Scalar>,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// 1-based path segment index; `0` for a named parameter.
    pub position: u32,
    /// Comma-separated HTTP methods; empty means all.
    pub methods: String,
    /// Free-text description.
    pub memo: String,
    /// Custom check run on each coerced value.
    #[serde(skip)]
    pub validator: Option<Validator>,
}

impl ParamSpec {
    /// Declares a named string parameter.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Declares the purpose entry carrying the schema's description.
    #[must_use]
    pub fn purpose(text: impl Into<String>) -> Self {
        Self {
            memo: text.into(),
            ..Self::default()
        }
    }

    /// Sets the type name.
    #[must_use]
    pub fn of_type(mut self, type_name: impl AsRef<str>) -> Self {
        self.type_name = type_name.as_ref().to_string();
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Scalar>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Marks the parameter as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Makes this a positional parameter at a 1-based segment index.
    #[must_use]
    pub fn position(mut self, position: u32) -> Self {
        self.position = position;
        self
    }

    /// Restricts the parameter to a comma-separated method list.
    #[must_use]
    pub fn methods(mut self, methods: impl Into<String>) -> Self {
        self.methods = methods.into();
        self
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// Attaches a validator.
    #[must_use]
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Attaches a validator built from a closure.
    #[must_use]
    pub fn check<F>(self, check: F) -> Self
    where
        F: Fn(Option<&Scalar>) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validator(Validator::new(check))
    }

    /// Returns true if this is the purpose entry.
    #[must_use]
    pub fn is_purpose(&self) -> bool {
        self.name.is_empty()
    }
}
