//! Formatting helpers for turning swatch data into the attribute strings an SVG-like renderer
//! consumes.

use std::fmt;

const FLOAT_SIGNIFICANT_DIGITS: i32 = 10;

/// An attribute value with an explicit formatting rule per semantic type: integers and strings are
/// used as-is, booleans become lowercase words, floats keep a fixed number of significant digits
/// and sequences are space-joined element by element.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<AttrValue>),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Str(value) => f.write_str(value),
            AttrValue::Int(value) => write!(f, "{}", value),
            AttrValue::Float(value) => f.write_str(&format_float(*value)),
            AttrValue::Bool(value) => write!(f, "{}", value),
            AttrValue::List(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }

                    write!(f, "{}", value)?;
                }

                Ok(())
            }
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<Vec<AttrValue>> for AttrValue {
    fn from(values: Vec<AttrValue>) -> Self {
        AttrValue::List(values)
    }
}

/// An ordered style map serialized as `;`-joined `key:value` pairs.
///
/// Keys keep their insertion order, re-setting a key keeps its original position, and keys without
/// a value are omitted from the serialized form entirely.
#[derive(Debug, Clone, Default)]
pub struct Style {
    entries: Vec<(String, Option<AttrValue>)>,
}

impl Style {
    pub fn new() -> Style {
        Style::default()
    }

    pub fn set(self, key: &str, value: impl Into<AttrValue>) -> Style {
        self.set_optional(key, Some(value.into()))
    }

    pub fn set_optional(mut self, key: &str, value: Option<AttrValue>) -> Style {
        if let Some(entry) = self.entries.iter_mut().find(|(existing, _)| existing == key) {
            entry.1 = value;
        } else {
            self.entries.push((key.to_string(), value));
        }

        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, value)| value.is_none())
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in &self.entries {
            if let Some(value) = value {
                if !first {
                    f.write_str(";")?;
                }

                write!(f, "{}:{}", key, value)?;
                first = false;
            }
        }

        Ok(())
    }
}

fn format_float(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }

    // round to a fixed number of significant digits, then let the shortest representation drop
    // any trailing zeros
    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10f64.powi(FLOAT_SIGNIFICANT_DIGITS - 1 - magnitude);
    ((value * scale).round() / scale).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_keys_are_omitted() {
        let style = Style::new()
            .set("fill", "#ff0080")
            .set_optional("stroke", None)
            .set("font-size", "5px");

        assert_eq!(style.to_string(), "fill:#ff0080;font-size:5px");
    }

    #[test]
    fn keys_keep_their_insertion_order() {
        let style = Style::new().set("b", "2").set("a", "1").set("c", "3");
        assert_eq!(style.to_string(), "b:2;a:1;c:3");
    }

    #[test]
    fn resetting_a_key_keeps_its_position() {
        let style = Style::new().set("a", "1").set("b", "2").set("a", "3");
        assert_eq!(style.to_string(), "a:3;b:2");
    }

    #[test]
    fn fully_unset_style_serializes_to_nothing() {
        let style = Style::new().set_optional("fill", None);
        assert!(style.is_empty());
        assert_eq!(style.to_string(), "");
    }

    #[test]
    fn booleans_are_lowercase_words() {
        assert_eq!(AttrValue::from(true).to_string(), "true");
        assert_eq!(AttrValue::from(false).to_string(), "false");
    }

    #[test]
    fn integers_are_plain() {
        assert_eq!(AttrValue::from(42i64).to_string(), "42");
        assert_eq!(AttrValue::from(-7i64).to_string(), "-7");
    }

    #[test]
    fn floats_drop_trailing_zeros() {
        assert_eq!(AttrValue::from(5.0).to_string(), "5");
        assert_eq!(AttrValue::from(-12.5).to_string(), "-12.5");
        assert_eq!(AttrValue::from(0.0).to_string(), "0");
    }

    #[test]
    fn floats_round_to_ten_significant_digits() {
        assert_eq!(AttrValue::from(0.1 + 0.2).to_string(), "0.3");
        assert_eq!(AttrValue::from(123.4567890123).to_string(), "123.456789");
    }

    #[test]
    fn lists_are_space_joined() {
        let value = AttrValue::List(vec![AttrValue::from(1.5), AttrValue::from(20i64), AttrValue::from("auto")]);
        assert_eq!(value.to_string(), "1.5 20 auto");
    }
}
