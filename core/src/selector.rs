use std::{fmt, str::FromStr};

use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer,
};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Key(String),
    Index(usize),
}

/// Path into a record's attributes, written as `style.name` or
/// `children[0].style.fontPostScriptName`. Keys containing dots or brackets
/// are quoted: `"font.family"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPathSelector {
    steps: Vec<Step>,
}

#[derive(Debug, Error)]
#[error("invalid key path `{input}`: {reason}")]
pub struct SelectorError {
    pub input: String,
    pub reason: String,
}

impl KeyPathSelector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        selector_parser::selector(input)
            .map(|steps| Self { steps })
            .map_err(|err| SelectorError {
                input: input.to_string(),
                reason: err.to_string(),
            })
    }

    /// Selector made of a single plain key, no parsing involved.
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            steps: vec![Step::Key(key.into())],
        }
    }

    pub fn resolve<'v>(&self, attributes: &'v Map<String, Value>) -> Option<&'v Value> {
        let (first, rest) = self.steps.split_first()?;
        let mut current = match first {
            Step::Key(key) => attributes.get(key)?,
            Step::Index(_) => return None,
        };
        for step in rest {
            current = match (step, current) {
                (Step::Key(key), Value::Object(map)) => map.get(key)?,
                (Step::Index(index), Value::Array(items)) => items.get(*index)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl fmt::Display for KeyPathSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for step in &self.steps {
            match step {
                Step::Key(key) => {
                    if !first {
                        f.write_str(".")?;
                    }
                    if key.chars().all(is_plain_key_char) && !key.is_empty() {
                        f.write_str(key)?;
                    } else {
                        write!(f, "\"{key}\"")?;
                    }
                }
                Step::Index(index) => write!(f, "[{index}]")?,
            }
            first = false;
        }
        Ok(())
    }
}

impl FromStr for KeyPathSelector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_plain_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '$' | '@')
}

peg::parser! {
  grammar selector_parser() for str {
    rule plain() -> String
        = k:$(['a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '-' | '$' | '@']+) { k.to_string() }

    rule quoted() -> String
        = "\"" k:$((!"\"" [_])*) "\"" { k.to_string() }

    rule index() -> Step
        = "[" n:$(['0'..='9']+) "]" {? n.parse().map(Step::Index).or(Err("array index")) }

    rule segment() -> Vec<Step>
        = k:(quoted() / plain()) i:index()* {
            let mut steps = vec![Step::Key(k)];
            steps.extend(i);
            steps
        }

    pub(crate) rule selector() -> Vec<Step>
        = s:(segment() ++ ".") { s.into_iter().flatten().collect() }
  }
}

struct SelectorVisitor;

impl<'de> Visitor<'de> for SelectorVisitor {
    type Value = KeyPathSelector;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a key path such as `id` or `style.name`")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        KeyPathSelector::parse(value).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for KeyPathSelector {
    fn deserialize<D>(deserializer: D) -> Result<KeyPathSelector, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(SelectorVisitor)
    }
}
