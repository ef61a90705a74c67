//! Generic decoding of OneCall JSON into the raw records.
//!
//! Each raw record lists the JSON keys it reads in a [`Schema::FIELDS`]
//! table. [`decode`] checks the table against the incoming object before
//! handing it to serde, so a missing key is reported by name instead of as a
//! column offset inside a serde message. Nested `current` and `weather`
//! objects are checked against their own tables. The raw value is then turned into
//! its public form through [`Normalize`].

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::{
    error::DecodeError,
    model::{CurrentWeather, OneCall, Weather},
    raw::{RawCurrentWeather, RawOneCall},
};

/// One JSON key read by a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(key: &'static str) -> Self {
        Self { key, required: true }
    }

    pub const fn optional(key: &'static str) -> Self {
        Self { key, required: false }
    }
}

/// A record that can be parsed out of a JSON object.
pub trait Schema: DeserializeOwned {
    /// Name used in error messages.
    const NAME: &'static str;
    const FIELDS: &'static [FieldSpec];
}

/// Pure second stage of construction: raw wire values into the public value
/// object.
pub trait Normalize {
    type Output;

    fn normalize(self) -> Self::Output;
}

/// Parse `json` into the raw record `T`.
pub fn decode<T: Schema>(json: &str) -> Result<T, DecodeError> {
    let value: Value = serde_json::from_str(json)?;
    decode_value(value)
}

/// Same as [`decode`] for an already parsed JSON value.
pub fn decode_value<T: Schema>(value: Value) -> Result<T, DecodeError> {
    check_fields::<T>(&value)?;
    debug!(record = T::NAME, "decoding record");
    Ok(serde_json::from_value(value)?)
}

/// Verify `value` is an object carrying every required key of `T`.
///
/// Optional keys may be absent or `null`; neither is checked further.
pub fn check_fields<T: Schema>(value: &Value) -> Result<(), DecodeError> {
    let object = value
        .as_object()
        .ok_or_else(|| DecodeError::NotAnObject(json_kind(value)))?;

    match T::FIELDS.iter().find(|f| f.required && !object.contains_key(f.key)) {
        Some(missing) => Err(DecodeError::MissingField { record: T::NAME, key: missing.key }),
        None => Ok(()),
    }
}

/// Check a `current` object and every entry of its `weather` array.
fn check_current(value: &Value) -> Result<(), DecodeError> {
    check_fields::<RawCurrentWeather>(value)?;
    if let Some(entries) = value.get("weather").and_then(Value::as_array) {
        for entry in entries {
            check_fields::<Weather>(entry)?;
        }
    }
    Ok(())
}

/// Decode a bare `current` fragment straight into [`CurrentWeather`].
pub fn decode_current(json: &str) -> Result<CurrentWeather, DecodeError> {
    let value: Value = serde_json::from_str(json)?;
    check_current(&value)?;
    decode_value::<RawCurrentWeather>(value).map(RawCurrentWeather::normalize)
}

/// Decode a full OneCall response. A `null` `current` reads as absent.
pub fn decode_one_call(json: &str) -> Result<OneCall, DecodeError> {
    let value: Value = serde_json::from_str(json)?;
    check_fields::<RawOneCall>(&value)?;
    if let Some(current) = value.get("current").filter(|v| !v.is_null()) {
        check_current(current)?;
    }
    decode_value::<RawOneCall>(value).map(RawOneCall::normalize)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
