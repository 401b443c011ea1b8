//! JSON body source.
//!
//! The body must be a flat JSON object. Field values map to raw strings:
//!
//! | JSON value | raw values |
//! |------------|------------|
//! | string     | the string |
//! | array      | one value per element |
//! | `null`     | field is absent |
//! | number, bool | their JSON text |
//! | object     | its JSON text |

use bytes::Bytes;
use serde_json::{Map, Value};

use crate::{ExtractedValues, ExtractionError, ExtractionSource};

fn raw_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Decodes an `application/json` body.
///
/// An empty (or whitespace-only) body yields no values.
pub(crate) fn json_values(body: &Bytes, max_size: usize) -> Result<ExtractedValues, ExtractionError> {
    if body.len() > max_size {
        return Err(ExtractionError::payload_too_large(max_size, body.len()));
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ExtractedValues::new());
    }

    let fields: Map<String, Value> = serde_json::from_slice(body)
        .map_err(|e| ExtractionError::malformed(ExtractionSource::Body, e.to_string()))?;

    let mut values = ExtractedValues::new();
    for (name, value) in fields {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                values.set(name, items.into_iter().map(raw_string).collect());
            }
            other => values.set(name, vec![raw_string(other)]),
        }
    }
    Ok(values)
}
