//! Property values and their canonical wire representation
//!
//! Every value attached to a `##vso[...]` command is rendered as text:
//! strings verbatim, booleans as `true`/`false`, numbers as plain decimals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Boolean(bool),
    Number(f64),
    String(String),
}

impl PropertyValue {
    /// Returns a short name of the value's kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyValue::Boolean(_) => "boolean",
            PropertyValue::Number(_) => "number",
            PropertyValue::String(_) => "string",
        }
    }

    /// Returns the string payload, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Writes a number the way the log scraper expects to read it back
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        // -0 renders as 0
        f.write_str("0")
    } else {
        write!(f, "{}", n)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::Number(n) => write_number(f, *n),
            PropertyValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<&String> for PropertyValue {
    fn from(value: &String) -> Self {
        PropertyValue::String(value.clone())
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Boolean(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        PropertyValue::Number(f64::from(value))
    }
}

macro_rules! number_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for PropertyValue {
                fn from(value: $t) -> Self {
                    PropertyValue::Number(f64::from(value))
                }
            }
        )*
    };
}

number_from!(u8, u16, u32, i8, i16, i32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_render_lowercase() {
        assert_eq!(PropertyValue::from(true).to_string(), "true");
        assert_eq!(PropertyValue::from(false).to_string(), "false");
    }

    #[test]
    fn integral_numbers_have_no_fraction() {
        assert_eq!(PropertyValue::from(1337).to_string(), "1337");
        assert_eq!(PropertyValue::from(15.0).to_string(), "15");
        assert_eq!(PropertyValue::from(-3).to_string(), "-3");
    }

    #[test]
    fn fractional_numbers_render_decimal() {
        assert_eq!(PropertyValue::from(12.5).to_string(), "12.5");
        assert_eq!(PropertyValue::from(0.25).to_string(), "0.25");
    }

    #[test]
    fn special_numbers() {
        assert_eq!(PropertyValue::from(-0.0).to_string(), "0");
        assert_eq!(PropertyValue::from(f64::NAN).to_string(), "NaN");
        assert_eq!(PropertyValue::from(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(
            PropertyValue::from(f64::NEG_INFINITY).to_string(),
            "-Infinity"
        );
    }

    #[test]
    fn strings_are_verbatim() {
        let value = PropertyValue::from("c:\\my dir;x=y");
        assert_eq!(value.to_string(), "c:\\my dir;x=y");
        assert_eq!(value.as_str(), Some("c:\\my dir;x=y"));
        assert_eq!(value.kind(), "string");
    }

    #[test]
    fn untagged_json_values() {
        let values: Vec<PropertyValue> = serde_json::from_str(r#"[true, 5, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                PropertyValue::Boolean(true),
                PropertyValue::Number(5.0),
                PropertyValue::String("x".to_string()),
            ]
        );
    }
}
