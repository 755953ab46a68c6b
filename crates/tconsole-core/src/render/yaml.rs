//! YAML document output.
//!
//! Each result becomes one item of a top-level sequence, serialized with
//! serde_yaml and framed as a single `---` ... `...` document.

use serde_yaml::{Mapping, Number, Value as Yaml};
use tracing::warn;

use crate::value::{Key, Value, as_integral};

/// Renders one document holding a sequence item per value.
pub fn render(values: &[Value]) -> String {
    let mut out = String::from("---\n");
    if !values.is_empty() {
        let items = Yaml::Sequence(values.iter().map(to_yaml).collect());
        match serde_yaml::to_string(&items) {
            Ok(body) => out.push_str(&body),
            Err(err) => warn!(%err, "failed to serialize YAML output"),
        }
    }
    out.push_str("...\n");
    out
}

fn to_yaml(value: &Value) -> Yaml {
    match value {
        Value::Null => Yaml::Null,
        Value::Bool(b) => Yaml::Bool(*b),
        Value::Integer(n) => Yaml::Number(Number::from(*n)),
        Value::Float(x) => match as_integral(*x) {
            Some(n) => Yaml::Number(Number::from(n)),
            None => Yaml::Number(Number::from(*x)),
        },
        Value::String(s) => Yaml::String(s.clone()),
        Value::Array(items) => Yaml::Sequence(items.iter().map(to_yaml).collect()),
        Value::Map(entries) => Yaml::Mapping(
            entries
                .iter()
                .map(|(key, value)| (key_to_yaml(key), to_yaml(value)))
                .collect(),
        ),
        Value::Error(message) => {
            let mut mapping = Mapping::new();
            mapping.insert(Yaml::from("error"), Yaml::String(message.clone()));
            Yaml::Mapping(mapping)
        }
    }
}

fn key_to_yaml(key: &Key) -> Yaml {
    match key {
        Key::Index(index) => Yaml::Number(Number::from(*index)),
        Key::Name(name) => Yaml::String(name.clone()),
    }
}
