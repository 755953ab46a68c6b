//! Dynamic result values produced by an evaluator.
//!
//! A `Value` mirrors what a Lua expression can yield: scalars, sequences,
//! tables with mixed positional and named keys, and error markers.

use std::fmt;

/// Key of a map entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Positional key (1-based, as in Lua).
    Index(u64),
    /// Named key.
    Name(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{index}"),
            Key::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<u64> for Key {
    fn from(index: u64) -> Self {
        Key::Index(index)
    }
}

/// One evaluated result.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `nil` / `box.NULL`.
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// Ordered sequence.
    Array(Vec<Value>),
    /// Table with explicit keys, insertion order preserved.
    Map(Vec<(Key, Value)>),
    /// Error raised while evaluating.
    Error(String),
}

impl Value {
    pub fn string(text: impl Into<String>) -> Self {
        Value::String(text.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Value::Error(message.into())
    }

    /// Builds a map from `(key, value)` pairs.
    pub fn map<K: Into<Key>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Returns true for arrays and maps.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Map(_))
    }

    /// Looks up a named or positional entry.
    pub fn get(&self, key: &Key) -> Option<&Value> {
        match (self, key) {
            (Value::Array(items), Key::Index(index)) => {
                let index = usize::try_from(*index).ok()?;
                items.get(index.checked_sub(1)?)
            }
            (Value::Map(entries), key) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Length of the leading positional run of a map (`1..=n` in order).
    pub fn positional_prefix(entries: &[(Key, Value)]) -> usize {
        entries
            .iter()
            .enumerate()
            .take_while(|(i, (key, _))| *key == Key::Index(*i as u64 + 1))
            .count()
    }

    /// True when every key of the map is positional and in order.
    pub fn is_positional_map(entries: &[(Key, Value)]) -> bool {
        Self::positional_prefix(entries) == entries.len()
    }

    /// Text shown in a top-level table cell.
    pub fn cell_text(&self) -> String {
        match self {
            Value::Null => "nil".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Float(x) => format_float(*x),
            Value::String(s) => s.clone(),
            Value::Error(message) => message.clone(),
            Value::Array(_) | Value::Map(_) => self.to_json().to_string(),
        }
    }

    /// JSON form used for nested table cells.
    ///
    /// Object keys come out sorted, positional keys as decimal strings.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Integer(n) => Json::from(*n),
            Value::Float(x) => serde_json::Number::from_f64(*x)
                .map_or_else(|| Json::String(format_float(*x)), Json::Number),
            Value::String(s) => Json::String(s.clone()),
            Value::Array(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(entries) => Json::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.to_json()))
                    .collect(),
            ),
            Value::Error(message) => {
                let mut object = serde_json::Map::new();
                object.insert("error".to_string(), Json::String(message.clone()));
                Json::Object(object)
            }
        }
    }
}

/// Returns the integer value of `x` when it has no fraction and prints exactly.
pub fn as_integral(x: f64) -> Option<i64> {
    (x.is_finite() && x == x.trunc() && x.abs() < 1e15).then_some(x as i64)
}

/// Formats a float the way the console prints numbers.
///
/// Integral values drop the fraction, non-finite values use `inf`/`-inf`/`nan`.
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        "nan".to_string()
    } else if x.is_infinite() {
        let text = if x > 0.0 { "inf" } else { "-inf" };
        text.to_string()
    } else if let Some(n) = as_integral(x) {
        n.to_string()
    } else {
        format!("{x}")
    }
}
