//! Cell values and type coercion
//!
//! Every CSV cell becomes a [`Value`]: a number when the trimmed text parses
//! as `f64`, lowercased text otherwise. Fields missing from a row are
//! [`Value::Absent`].
//!
//! A failed numeric parse is not an error. It is the normal path for
//! categorical data.

use std::fmt;

/// A single cell value.
#[derive(Debug, Clone, PartialEq, derive_more::IsVariant)]
pub enum Value {
    /// A cell whose trimmed text parsed as a floating-point number
    Number(f64),
    /// A cell that did not parse as a number, trimmed and lowercased
    Text(String),
    /// No value (field missing from the row)
    Absent,
}

impl Value {
    /// Coerces raw cell text into a value.
    ///
    /// The text is trimmed, then parsed as `f64`. On failure the trimmed text
    /// is lowercased and kept as [`Value::Text`]. An empty cell becomes
    /// `Text("")` unless `empty_as_absent` is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use colstats_analysis::value::Value;
    ///
    /// assert_eq!(Value::from_cell(" 2.5 ", false), Value::Number(2.5));
    /// assert_eq!(Value::from_cell(" Yes ", false), Value::Text("yes".to_owned()));
    /// assert_eq!(Value::from_cell("", false), Value::Text(String::new()));
    /// assert_eq!(Value::from_cell("  ", true), Value::Absent);
    /// ```
    #[must_use]
    pub fn from_cell(raw: &str, empty_as_absent: bool) -> Self {
        let trimmed = raw.trim();
        if empty_as_absent && trimmed.is_empty() {
            return Value::Absent;
        }
        match trimmed.parse::<f64>() {
            Ok(n) => Value::Number(n),
            Err(_) => Value::Text(trimmed.to_lowercase()),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
            Value::Absent => f.write_str("<absent>"),
        }
    }
}
