use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::selector::KeyPathSelector;

/// A single design value handed over by a format adapter.
///
/// The record is an opaque bag of attributes. Its grouping name is not stored
/// on the record: it is derived on every build from the configured key paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenRecord {
    attributes: Map<String, Value>,
}

impl TokenRecord {
    pub fn new(attributes: Map<String, Value>) -> Self {
        Self { attributes }
    }

    /// Builds a record from a JSON object. Anything else yields `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(attributes) => Some(Self { attributes }),
            _ => None,
        }
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn resolve(&self, selector: &KeyPathSelector) -> Option<&Value> {
        selector.resolve(&self.attributes)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

impl From<Map<String, Value>> for TokenRecord {
    fn from(attributes: Map<String, Value>) -> Self {
        Self::new(attributes)
    }
}
