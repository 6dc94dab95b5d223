//! This module implements strict decoding from JSON, using [`serde_json`].
//!
//! Only reading is strict.  The `to_*` functions here are plain
//! `serde_json` serialization; they produce the same output no matter how
//! a [`Decoder`] is configured.
//!
//! # Examples
//!
//! ```
//! use strict_record::{json, Decoder, DecodeError, Value};
//!
//! // `Value` decodes anything, so this always succeeds.
//! let decoder = Decoder::default();
//! let value: Value = json::from_str(&decoder, r#"{ "name": "Bob", "age": 43 }"#).unwrap();
//! assert!(!value.is_null());
//!
//! // Trailing characters are a stream error.
//! let err = json::from_str::<Value>(&decoder, "1 2").unwrap_err();
//! assert!(matches!(err, DecodeError::MalformedStream(_)));
//! ```
//!

#![cfg(feature = "serde_json")]

use crate::context::Decoder;
use crate::decode::Decode;
use crate::util::{DecodeError, DecodeResult};
use serde::Serialize;
use serde_json::Value as JSON_Value;
use std::io;

/// Decode JSON text into a `T`.
pub fn from_str<T: Decode>(decoder: &Decoder, json: &str) -> DecodeResult<T> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let value = decoder.decode(&mut deserializer)?;
    deserializer.end().map_err(DecodeError::malformed)?;
    Ok(value)
}

/// Decode JSON bytes into a `T`.
pub fn from_slice<T: Decode>(decoder: &Decoder, json: &[u8]) -> DecodeResult<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(json);
    let value = decoder.decode(&mut deserializer)?;
    deserializer.end().map_err(DecodeError::malformed)?;
    Ok(value)
}

/// Decode JSON from a reader into a `T`.
pub fn from_reader<R: io::Read, T: Decode>(decoder: &Decoder, reader: R) -> DecodeResult<T> {
    let mut deserializer = serde_json::Deserializer::from_reader(reader);
    let value = decoder.decode(&mut deserializer)?;
    deserializer.end().map_err(DecodeError::malformed)?;
    Ok(value)
}

/// Decode an already-parsed JSON tree into a `T`.
pub fn from_value<T: Decode>(decoder: &Decoder, value: JSON_Value) -> DecodeResult<T> {
    decoder.decode(value)
}

/// Serialize `value` as JSON text, exactly as `serde_json` would.
pub fn to_string<T: ?Sized + Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string(value)
}

/// Serialize `value` as pretty-printed JSON text, exactly as `serde_json`
/// would.
pub fn to_string_pretty<T: ?Sized + Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Serialize `value` into a JSON tree, exactly as `serde_json` would.
pub fn to_value<T: Serialize>(value: T) -> serde_json::Result<JSON_Value> {
    serde_json::to_value(value)
}

#[test]
fn test_json_number_behavior() {
    // Integers and floats must stay distinct when captured for diagnostics,
    // so that an unknown value is reported the way it was written.
    use crate::value::Value;

    let decoder = Decoder::default();
    let value: Value = from_str(&decoder, "1").unwrap();
    assert_eq!(value, Value::Integer(1));

    let value: Value = from_str(&decoder, "-1").unwrap();
    assert_eq!(value, Value::Integer(-1));

    let value: Value = from_str(&decoder, "1.0").unwrap();
    assert_eq!(value, Value::from_float(1.0));
    assert_eq!(value.to_string(), "1.0");
}
