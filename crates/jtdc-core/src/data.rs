//! Runtime data model checked by compiled validators
//!
//! JSON input converts losslessly enough for type checks: every number becomes
//! an `f64`, which also lets callers hand in NaN and infinities that JSON text
//! cannot carry. Native date-times have no JSON spelling and only enter through
//! the Rust API.

use chrono::{DateTime, FixedOffset, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

/// Runtime kind of a data value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Boolean,
    Number,
    String,
    DateTime,
    Array,
    Object,
}

impl Kind {
    /// Stable name used in generated code and diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::DateTime => "date-time",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A data value under validation
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    DateTime(DateTime<FixedOffset>),
    Array(Vec<Data>),
    Object(BTreeMap<String, Data>),
}

impl Data {
    /// Get the runtime kind
    pub fn kind(&self) -> Kind {
        match self {
            Self::Null => Kind::Null,
            Self::Bool(_) => Kind::Boolean,
            Self::Number(_) => Kind::Number,
            Self::String(_) => Kind::String,
            Self::DateTime(_) => Kind::DateTime,
            Self::Array(_) => Kind::Array,
            Self::Object(_) => Kind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a value by JSON Pointer (RFC 6901)
    ///
    /// The empty pointer addresses the value itself.
    pub fn pointer(&self, pointer: &str) -> Option<&Data> {
        if pointer.is_empty() {
            return Some(self);
        }
        let rest = pointer.strip_prefix('/')?;

        rest.split('/')
            .map(|token| token.replace("~1", "/").replace("~0", "~"))
            .try_fold(self, |target, token| match target {
                Self::Object(map) => map.get(&token),
                Self::Array(items) => parse_index(&token).and_then(|i| items.get(i)),
                _ => None,
            })
    }

    /// Short human-readable rendering for diagnostics
    pub fn describe(&self) -> String {
        const MAX_LEN: usize = 40;

        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::String(s) if s.chars().count() > MAX_LEN => {
                let head: String = s.chars().take(MAX_LEN).collect();
                format!("{:?}...", head)
            }
            Self::String(s) => format!("{:?}", s),
            Self::DateTime(dt) => format!("date-time {}", dt.to_rfc3339()),
            Self::Array(items) => format!("array of {} items", items.len()),
            Self::Object(map) => format!("object with {} fields", map.len()),
        }
    }
}

fn parse_index(token: &str) -> Option<usize> {
    // RFC 6901: no leading zeros, no sign
    if token.is_empty() || (token.len() > 1 && token.starts_with('0')) {
        return None;
    }
    token.parse().ok()
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        n.to_string()
    }
}

impl From<Value> for Data {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Data::from).collect()),
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Data::from(v))).collect())
            }
        }
    }
}

impl From<&Value> for Data {
    fn from(value: &Value) -> Self {
        Self::from(value.clone())
    }
}

impl From<bool> for Data {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Data {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Data {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Data {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Data {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<DateTime<FixedOffset>> for Data {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::DateTime(dt)
    }
}

impl From<DateTime<Utc>> for Data {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt.fixed_offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kinds_from_json() {
        assert_eq!(Data::from(json!(null)).kind(), Kind::Null);
        assert_eq!(Data::from(json!(true)).kind(), Kind::Boolean);
        assert_eq!(Data::from(json!(1)).kind(), Kind::Number);
        assert_eq!(Data::from(json!(1.5)).kind(), Kind::Number);
        assert_eq!(Data::from(json!("x")).kind(), Kind::String);
        assert_eq!(Data::from(json!([1])).kind(), Kind::Array);
        assert_eq!(Data::from(json!({"a": 1})).kind(), Kind::Object);
        assert_eq!(Data::from(Utc::now()).kind(), Kind::DateTime);
    }

    #[test]
    fn large_integers_become_floats() {
        assert_eq!(Data::from(json!(4294967295u64)).as_f64(), Some(4294967295.0));
        assert_eq!(Data::from(json!(-2147483648i64)).as_f64(), Some(-2147483648.0));
    }

    #[test]
    fn pointer_lookup() {
        let data = Data::from(json!({
            "user": {"tags": ["a", "b"], "a/b": 1, "m~n": 2},
            "n": 3
        }));

        assert_eq!(data.pointer(""), Some(&data));
        assert_eq!(data.pointer("/n"), Some(&Data::Number(3.0)));
        assert_eq!(data.pointer("/user/tags/1"), Some(&Data::from("b")));
        assert_eq!(data.pointer("/user/a~1b"), Some(&Data::Number(1.0)));
        assert_eq!(data.pointer("/user/m~0n"), Some(&Data::Number(2.0)));
        assert_eq!(data.pointer("/user/tags/01"), None);
        assert_eq!(data.pointer("/missing"), None);
        assert_eq!(data.pointer("n"), None);
    }

    #[test]
    fn describe_values() {
        assert_eq!(Data::Number(f64::NAN).describe(), "NaN");
        assert_eq!(Data::Number(f64::NEG_INFINITY).describe(), "-Infinity");
        assert_eq!(Data::Number(2.5).describe(), "2.5");
        assert_eq!(Data::from("hi").describe(), "\"hi\"");
        assert!(Data::from("x".repeat(100)).describe().ends_with("..."));
    }
}
