use std::collections::HashMap;

use serde_json::{Map, Number, Value};

use super::fields::{FilterRelation, FilterSpec};

/// Raw filter input for one request, not yet validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterRequest {
    values: Map<String, Value>,
}

impl FilterRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(values) => Self { values },
            _ => Self::default(),
        }
    }

    /// Coerce query-string pairs using the declared relation of each key.
    ///
    /// Values that do not parse stay strings so the validator can report them.
    pub fn from_query(spec: &FilterSpec, query: &HashMap<String, String>) -> Self {
        let mut values = Map::new();
        for (key, raw) in query {
            let value = match spec.field(key).map(|f| f.relation) {
                Some(FilterRelation::Min) | Some(FilterRelation::Max) => raw
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(normalize_number)
                    .unwrap_or_else(|| Value::String(raw.clone())),
                Some(FilterRelation::Truthy) => match raw.trim() {
                    "true" => Value::Bool(true),
                    "false" => Value::Bool(false),
                    _ => Value::String(raw.clone()),
                },
                _ => Value::String(raw.clone()),
            };
            values.insert(key.clone(), value);
        }
        Self { values }
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// "50" should read back as 50, not 50.0
fn normalize_number(n: Number) -> Value {
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Value::from(f as i64),
        _ => Value::Number(n),
    }
}
