use serde_json::Value;

use crate::{
    diagnostics::InvalidTokenName, policy::GroupingPolicy, record::TokenRecord,
};

/// Derives the grouping segments of a record from the policy's key paths.
pub struct KeyPathExtractor<'p> {
    policy: &'p GroupingPolicy,
}

impl<'p> KeyPathExtractor<'p> {
    pub fn new(policy: &'p GroupingPolicy) -> Self {
        Self { policy }
    }

    pub fn extract(&self, record: &TokenRecord) -> Result<Vec<String>, InvalidTokenName> {
        let mut segments = Vec::new();
        for selector in &self.policy.key_paths {
            if let Some(value) = record.resolve(selector) {
                self.push_value(value, &mut segments);
            }
        }
        if segments.is_empty() {
            Err(InvalidTokenName)
        } else {
            Ok(segments)
        }
    }

    fn push_value(&self, value: &Value, segments: &mut Vec<String>) {
        match value {
            Value::String(s) => self.push_str(s, segments),
            Value::Number(n) => self.push_str(&n.to_string(), segments),
            Value::Bool(b) => self.push_str(if *b { "true" } else { "false" }, segments),
            // pre-split names; nested arrays and objects are not names
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::String(_) | Value::Number(_) | Value::Bool(_) => {
                            self.push_value(item, segments)
                        }
                        _ => {}
                    }
                }
            }
            Value::Object(_) | Value::Null => {}
        }
    }

    fn push_str(&self, s: &str, segments: &mut Vec<String>) {
        let normalization = &self.policy.normalization;
        let delimiter = self.policy.delimiter.as_str();
        let mut push = |part: &str| {
            let part = normalization.apply(part);
            if !part.is_empty() {
                segments.push(part);
            }
        };
        if delimiter.is_empty() {
            push(s);
        } else {
            s.split(delimiter).for_each(push);
        }
    }
}
