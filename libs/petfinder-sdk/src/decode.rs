//! Turning upstream response bodies into typed records.
//!
//! Bodies are parsed into a [`serde_json::Value`] first so that a missing or
//! mistyped top-level field is reported by name instead of as a generic serde
//! error.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::models::Breed;

const BREEDS_OPERATION: &str = "get_breeds_for_type";
const BREEDS_KEY: &str = "breeds";

/// Decode the value under `key` of a `{"<key>": ...}` envelope.
///
/// # Errors
///
/// [`DecodeError::InvalidJson`], [`DecodeError::NotAnObject`],
/// [`DecodeError::MissingKey`] or [`DecodeError::WrongShape`] when the value
/// does not convert into `T`.
pub fn decode_enveloped<T: DeserializeOwned>(
    operation: &'static str,
    bytes: &[u8],
    key: &'static str,
) -> Result<T, DecodeError> {
    let mut root = parse_object(operation, bytes)?;
    let value = root
        .remove(key)
        .ok_or(DecodeError::MissingKey { operation, key })?;

    serde_json::from_value(value).map_err(|e| DecodeError::WrongShape {
        operation,
        path: key.to_owned(),
        expected: std::any::type_name::<T>(),
        detail: e.to_string(),
    })
}

/// Decode a whole response document (list responses with pagination).
///
/// # Errors
///
/// [`DecodeError::InvalidJson`], [`DecodeError::NotAnObject`] or
/// [`DecodeError::WrongShape`].
pub fn decode_document<T: DeserializeOwned>(
    operation: &'static str,
    bytes: &[u8],
) -> Result<T, DecodeError> {
    let root = parse_object(operation, bytes)?;
    serde_json::from_value(Value::Object(root)).map_err(|e| DecodeError::WrongShape {
        operation,
        path: "$".to_owned(),
        expected: std::any::type_name::<T>(),
        detail: e.to_string(),
    })
}

/// Decode the body of `/types/{type}/breeds`.
///
/// The envelope is walked as an untyped tree: `breeds` must exist and be an
/// array, then each element is converted on its own so a bad entry is
/// reported with its index.
///
/// # Errors
///
/// [`DecodeError::MissingKey`] when `breeds` is absent,
/// [`DecodeError::WrongShape`] when it is not an array or an element is not a
/// breed object.
pub fn decode_breeds(bytes: &[u8]) -> Result<Vec<Breed>, DecodeError> {
    let mut root = parse_object(BREEDS_OPERATION, bytes)?;

    let entries = match root.remove(BREEDS_KEY) {
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(DecodeError::WrongShape {
                operation: BREEDS_OPERATION,
                path: BREEDS_KEY.to_owned(),
                expected: "an array",
                detail: format!("found {}", kind(&other)),
            });
        }
        None => {
            return Err(DecodeError::MissingKey {
                operation: BREEDS_OPERATION,
                key: BREEDS_KEY,
            });
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value::<Breed>(entry).map_err(|e| DecodeError::WrongShape {
                operation: BREEDS_OPERATION,
                path: format!("{BREEDS_KEY}[{index}]"),
                expected: "a breed object",
                detail: e.to_string(),
            })
        })
        .collect()
}

fn parse_object(operation: &'static str, bytes: &[u8]) -> Result<Map<String, Value>, DecodeError> {
    match serde_json::from_slice(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(DecodeError::NotAnObject { operation }),
        Err(source) => Err(DecodeError::InvalidJson { operation, source }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
