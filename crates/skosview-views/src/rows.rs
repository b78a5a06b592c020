//! Generic result records consumed by the listing renderer.

use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

/// One rendered row: a zero-based position and named field values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultRow {
    pub index: usize,
    pub fields: Map<String, JsonValue>,
}

impl ResultRow {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            fields: Map::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with(mut self, name: &str, value: impl Serialize) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Serialize) {
        let value = serde_json::to_value(value).unwrap_or(JsonValue::Null);
        self.fields.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.fields.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(JsonValue::as_str)
    }
}

/// Outcome of one query execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewExecution {
    pub result: Vec<ResultRow>,
    pub total_rows: u64,
    pub execute_time: Duration,
}

impl ViewExecution {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }
}
