use crate::error::ImportError;
use serde_json::{Map, Number, Value};
use serde_yaml::Value as Yaml;

/// Parses YAML into a JSON value tree. Non-string mapping keys (e.g. response codes
/// written as bare integers) are stringified.
pub(super) fn parse(text: &str) -> Result<Value, ImportError> {
    let yaml: Yaml = serde_yaml::from_str(text).map_err(|e| ImportError::ParseError(e.to_string()))?;
    Ok(to_json(yaml))
}

fn to_json(yaml: Yaml) -> Value {
    match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(items.into_iter().map(to_json).collect()),
        Yaml::Mapping(mapping) => {
            let object: Map<String, Value> = mapping
                .into_iter()
                .map(|(key, value)| (key_string(key), to_json(value)))
                .collect();
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => to_json(tagged.value),
    }
}

fn key_string(key: Yaml) -> String {
    match key {
        Yaml::String(s) => s,
        Yaml::Number(n) => n.to_string(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}
