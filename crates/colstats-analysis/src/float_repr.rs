//! Serde helpers for floats that may not be finite
//!
//! JSON has no representation for `NaN` or infinities. Fields annotated with
//! `#[serde(with = "crate::float_repr")]` write such values as strings
//! (`"NaN"`, `"inf"`, `"-inf"`) instead of failing the whole export, and
//! accept either form when read back.

use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

#[expect(clippy::trivially_copy_pass_by_ref)]
pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let value = *value;
    if value.is_finite() {
        serializer.serialize_f64(value)
    } else if value.is_nan() {
        serializer.serialize_str("NaN")
    } else if value.is_sign_positive() {
        serializer.serialize_str("inf")
    } else {
        serializer.serialize_str("-inf")
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.parse().map_err(|_| {
            serde::de::Error::custom(format!("invalid float representation '{s}'"))
        }),
    }
}
