//! Typed property values and their JCR string encoding.
//!
//! Non-string values are encoded as `{Type}value`, arrays as `{Type}[v1,v2]`,
//! matching the FileVault DocView attribute format. Bare strings stay
//! unprefixed; a literal leading `{` is escaped as `\{`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A typed attribute value on an output node.
///
/// Deserialization is untagged so definition documents can write plain JSON
/// scalars; `Date` values are constructed programmatically (JSON strings stay
/// strings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Boolean(bool),
    Long(i64),
    Double(f64),
    String(String),
    Date(DateTime<Utc>),
    StringArray(Vec<String>),
    BooleanArray(Vec<bool>),
    LongArray(Vec<i64>),
}

impl PropertyValue {
    /// Encode to the DocView attribute string.
    pub fn encode(&self) -> String {
        match self {
            Self::String(s) => {
                if s.starts_with('{') || s.starts_with('[') {
                    format!("\\{s}")
                } else {
                    s.clone()
                }
            }
            Self::Boolean(b) => format!("{{Boolean}}{b}"),
            Self::Long(n) => format!("{{Long}}{n}"),
            Self::Double(d) => format!("{{Double}}{d}"),
            Self::Date(d) => format!("{{Date}}{}", d.to_rfc3339_opts(SecondsFormat::Millis, false)),
            Self::StringArray(items) => format!("[{}]", encode_items(items.iter().cloned())),
            Self::BooleanArray(items) => format!(
                "{{Boolean}}[{}]",
                encode_items(items.iter().map(ToString::to_string))
            ),
            Self::LongArray(items) => format!(
                "{{Long}}[{}]",
                encode_items(items.iter().map(ToString::to_string))
            ),
        }
    }

    /// The plain string form, without type prefixes (for display and tests).
    pub fn as_plain_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// True for values that carry no content worth serializing.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::String(s) => s.is_empty(),
            Self::StringArray(v) => v.is_empty(),
            Self::BooleanArray(v) => v.is_empty(),
            Self::LongArray(v) => v.is_empty(),
            _ => false,
        }
    }
}

/// Escape array items: backslashes and commas are significant in DocView lists.
fn encode_items(items: impl Iterator<Item = String>) -> String {
    items
        .map(|item| item.replace('\\', "\\\\").replace(',', "\\,"))
        .collect::<Vec<_>>()
        .join(",")
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<DateTime<Utc>> for PropertyValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(value: Vec<String>) -> Self {
        Self::StringArray(value)
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_string_passthrough() {
        assert_eq!(PropertyValue::from("hello").encode(), "hello");
    }

    #[test]
    fn test_leading_brace_escaped() {
        assert_eq!(PropertyValue::from("{literal}").encode(), "\\{literal}");
    }

    #[test]
    fn test_typed_scalars() {
        assert_eq!(PropertyValue::Boolean(true).encode(), "{Boolean}true");
        assert_eq!(PropertyValue::Long(42).encode(), "{Long}42");
        assert_eq!(PropertyValue::Double(1.5).encode(), "{Double}1.5");
    }

    #[test]
    fn test_date_encoding() {
        let date = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            PropertyValue::Date(date).encode(),
            "{Date}2024-01-02T03:04:05.000+00:00"
        );
    }

    #[test]
    fn test_string_array() {
        let value = PropertyValue::StringArray(vec!["a".to_string(), "b,c".to_string()]);
        assert_eq!(value.encode(), "[a,b\\,c]");
    }

    #[test]
    fn test_long_array() {
        assert_eq!(PropertyValue::LongArray(vec![1, 2]).encode(), "{Long}[1,2]");
    }

    #[test]
    fn test_untagged_deserialization() {
        let v: PropertyValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, PropertyValue::Boolean(true));
        let v: PropertyValue = serde_json::from_str("7").unwrap();
        assert_eq!(v, PropertyValue::Long(7));
        let v: PropertyValue = serde_json::from_str("\"2024-01-02\"").unwrap();
        assert_eq!(v, PropertyValue::String("2024-01-02".to_string()));
    }
}
