//! Raw string coercion.
//!
//! Each parameter's raw values are coerced independently. Within one
//! parameter the first bad value stops coercion and yields a single
//! diagnostic; other parameters are unaffected.

use crate::schema::CompiledParam;
use crate::{Diagnostic, ParamType, ParamValues, Scalar};

/// Parses an integer, detecting the base from its prefix.
///
/// `0x`/`0X` selects base 16, any other leading `0` selects base 8, and
/// everything else is decimal. A single leading sign is allowed.
///
/// # Example
///
/// ```rust
/// use sieve_core::parse_int;
///
/// assert_eq!(parse_int("0x1A"), Some(26));
/// assert_eq!(parse_int("010"), Some(8));
/// assert_eq!(parse_int("10"), Some(10));
/// assert_eq!(parse_int("-0x10"), Some(-16));
/// assert_eq!(parse_int("0xZZ"), None);
/// ```
#[must_use]
pub fn parse_int(raw: &str) -> Option<i64> {
    let (negative, unsigned) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let (digits, radix) = if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        (hex, 16)
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        (&unsigned[1..], 8)
    } else {
        (unsigned, 10)
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    if negative {
        i64::from_str_radix(&format!("-{digits}"), radix).ok()
    } else {
        i64::from_str_radix(digits, radix).ok()
    }
}

/// Parses a 64-bit float.
#[must_use]
pub fn parse_float(raw: &str) -> Option<f64> {
    raw.parse().ok()
}

/// Parses boolean text.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their false
/// counterparts `0`, `f`, `F`, `FALSE`, `false`, `False`.
#[must_use]
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Parses a flag value: the empty string means the flag is set.
fn parse_flag(raw: &str) -> Option<bool> {
    if raw.is_empty() {
        Some(true)
    } else {
        parse_bool(raw)
    }
}

/// Parses every raw value, stopping at the first that fails.
fn parse_all<T>(
    param: &CompiledParam,
    raw: &[String],
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Vec<T>, Diagnostic> {
    raw.iter()
        .map(|value| {
            parse(value.as_str())
                .ok_or_else(|| Diagnostic::invalid_type(&param.name, value, param.param_type))
        })
        .collect()
}

/// Runs the validator, if any, over parsed values.
fn validate<T>(
    param: &CompiledParam,
    raw: &[String],
    parsed: &[T],
    to_scalar: impl Fn(&T) -> Scalar,
) -> Result<(), Diagnostic> {
    let Some(validator) = &param.validator else {
        return Ok(());
    };
    for (value, raw) in parsed.iter().zip(raw) {
        validator
            .check(Some(&to_scalar(value)))
            .map_err(|reason| Diagnostic::validation_failed(&param.name, raw, &reason))?;
    }
    Ok(())
}

/// Coerces the raw values of one parameter.
///
/// An empty raw list means the parameter was not supplied: required
/// parameters yield a missing diagnostic, optional ones their default.
pub(crate) fn coerce(param: &CompiledParam, raw: &[String]) -> Result<ParamValues, Diagnostic> {
    if raw.is_empty() {
        if param.required {
            return Err(Diagnostic::missing(&param.name));
        }
        return Ok(ParamValues::single(&param.default));
    }

    match param.param_type {
        ParamType::String => {
            validate(param, raw, raw, |s| Scalar::String(s.clone()))?;
            Ok(ParamValues::Strings(raw.to_vec()))
        }
        ParamType::Int => {
            let ints = parse_all(param, raw, parse_int)?;
            validate(param, raw, &ints, |i| Scalar::Int(*i))?;
            Ok(ParamValues::Ints(ints))
        }
        ParamType::Float => {
            let floats = parse_all(param, raw, parse_float)?;
            validate(param, raw, &floats, |f| Scalar::Float(*f))?;
            Ok(ParamValues::Floats(floats))
        }
        ParamType::Bool => Ok(ParamValues::Bools(parse_all(param, raw, parse_flag)?)),
    }
}
