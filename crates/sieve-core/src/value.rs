//! Parameter types and typed values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SchemaError;

/// Declared type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// Text, passed through unchanged.
    #[default]
    String,
    /// 64-bit signed integer with base detection.
    Int,
    /// 64-bit float.
    Float,
    /// Boolean flag.
    Bool,
}

impl ParamType {
    /// Returns the lower-case type name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
        }
    }
}

impl AsRef<str> for ParamType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamType {
    type Err = SchemaError;

    /// Parses a type name case-insensitively; the empty name means `string`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "string" => Ok(Self::String),
            "int" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "bool" => Ok(Self::Bool),
            _ => Err(SchemaError::InvalidType(s.to_string())),
        }
    }
}

/// A single typed value: a default, or one item handed to a validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// String value.
    String(String),
}

impl Scalar {
    /// Returns the zero value for a type.
    #[must_use]
    pub fn zero(param_type: ParamType) -> Self {
        match param_type {
            ParamType::String => Self::String(String::new()),
            ParamType::Int => Self::Int(0),
            ParamType::Float => Self::Float(0.0),
            ParamType::Bool => Self::Bool(false),
        }
    }

    /// Returns the type this value carries.
    #[must_use]
    pub fn param_type(&self) -> ParamType {
        match self {
            Self::String(_) => ParamType::String,
            Self::Int(_) => ParamType::Int,
            Self::Float(_) => ParamType::Float,
            Self::Bool(_) => ParamType::Bool,
        }
    }

    /// Returns the string value, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer value, if this is an integer.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float value, if this is a float.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is a bool.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// The typed values resolved for one parameter.
///
/// The variant always matches the parameter's declared [`ParamType`].
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValues {
    /// Values of a `string` parameter.
    Strings(Vec<String>),
    /// Values of an `int` parameter.
    Ints(Vec<i64>),
    /// Values of a `float` parameter.
    Floats(Vec<f64>),
    /// Values of a `bool` parameter.
    Bools(Vec<bool>),
}

impl ParamValues {
    /// Wraps a single default value.
    #[must_use]
    pub fn single(value: &Scalar) -> Self {
        match value {
            Scalar::String(s) => Self::Strings(vec![s.clone()]),
            Scalar::Int(i) => Self::Ints(vec![*i]),
            Scalar::Float(f) => Self::Floats(vec![*f]),
            Scalar::Bool(b) => Self::Bools(vec![*b]),
        }
    }

    /// Returns the type of the stored values.
    #[must_use]
    pub fn param_type(&self) -> ParamType {
        match self {
            Self::Strings(_) => ParamType::String,
            Self::Ints(_) => ParamType::Int,
            Self::Floats(_) => ParamType::Float,
            Self::Bools(_) => ParamType::Bool,
        }
    }

    /// Returns the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Strings(v) => v.len(),
            Self::Ints(v) => v.len(),
            Self::Floats(v) => v.len(),
            Self::Bools(v) => v.len(),
        }
    }

    /// Returns true if there are no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
