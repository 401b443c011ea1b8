//! Schema compile errors and accessor errors.

use thiserror::Error;

use crate::ParamType;

/// Errors raised while compiling a schema.
///
/// These are startup failures: a schema that fails to compile must not be
/// registered or used to parse requests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Two parameters share a name.
    #[error("arg name {0:?} duplicated")]
    DuplicateName(String),

    /// More than one entry carries the purpose text.
    #[error("purpose declared more than once")]
    DuplicatePurpose,

    /// The purpose entry declares more than free text.
    #[error("purpose entry must only carry a memo")]
    InvalidPurpose,

    /// Unknown type name.
    #[error("invalid param type {0:?}")]
    InvalidType(String),

    /// Default value does not match the declared type.
    #[error("default value {value} is not a valid {expected} (arg:{name})")]
    InvalidDefault {
        /// Parameter name.
        name: String,
        /// Declared type.
        expected: ParamType,
        /// The offending default, as written.
        value: String,
    },

    /// Unknown HTTP method in a method restriction.
    #[error("invalid http method {method:?} (arg:{name})")]
    InvalidMethod {
        /// Parameter name.
        name: String,
        /// The unrecognized method token.
        method: String,
    },

    /// Two positional parameters share a position.
    #[error("same position {position} ({first:?}, {second:?})")]
    DuplicatePosition {
        /// The shared position.
        position: u32,
        /// First parameter at that position.
        first: String,
        /// Second parameter at that position.
        second: String,
    },

    /// A validator was attached to a boolean parameter.
    #[error("bool parameter cannot have a validator (arg:{0})")]
    BoolValidator(String),
}

/// Error returned by the `try_*` accessors of
/// [`ParsedArgs`](crate::ParsedArgs).
///
/// A mismatch means the calling code and the schema disagree about a
/// parameter's type; it never describes a bad request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The parameter is declared with a different type.
    #[error("parameter {name:?} is {declared}, not {requested}")]
    TypeMismatch {
        /// Parameter name.
        name: String,
        /// Declared type.
        declared: ParamType,
        /// Type the caller asked for.
        requested: ParamType,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_messages() {
        assert_eq!(
            SchemaError::DuplicateName("q".into()).to_string(),
            r#"arg name "q" duplicated"#
        );
        assert_eq!(
            SchemaError::InvalidDefault {
                name: "n".into(),
                expected: ParamType::Int,
                value: "\"ten\"".into(),
            }
            .to_string(),
            r#"default value "ten" is not a valid int (arg:n)"#
        );
        assert_eq!(
            SchemaError::DuplicatePosition {
                position: 1,
                first: "a".into(),
                second: "b".into(),
            }
            .to_string(),
            r#"same position 1 ("a", "b")"#
        );
    }

    #[test]
    fn test_access_error_message() {
        let err = AccessError::TypeMismatch {
            name: "limit".into(),
            declared: ParamType::Int,
            requested: ParamType::String,
        };
        assert_eq!(err.to_string(), r#"parameter "limit" is int, not string"#);
    }
}
