use convert_case::{Case, Casing};
use serde::Deserialize;

use crate::selector::KeyPathSelector;

pub const DEFAULT_DELIMITER: &str = "/";

/// Declarative half of a grouping call. The leaf transform travels next to it
/// as a closure, see [`crate::build_least_depth_tree`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GroupingPolicy {
    /// Attribute paths concatenated, in order, into a token's grouping name.
    pub key_paths: Vec<KeyPathSelector>,
    pub delimiter: String,
    pub conflict_resolution: ConflictResolution,
    pub normalization: SegmentNormalization,
}

impl Default for GroupingPolicy {
    fn default() -> Self {
        Self {
            key_paths: vec![KeyPathSelector::key("id")],
            delimiter: DEFAULT_DELIMITER.to_string(),
            conflict_resolution: ConflictResolution::default(),
            normalization: SegmentNormalization::default(),
        }
    }
}

impl GroupingPolicy {
    pub fn with_key_paths(mut self, key_paths: Vec<KeyPathSelector>) -> Self {
        self.key_paths = key_paths;
        self
    }

    pub fn with_conflict_resolution(mut self, resolution: ConflictResolution) -> Self {
        self.conflict_resolution = resolution;
        self
    }
}

/// Which record survives when two records share a full name but differ in
/// attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictResolution {
    #[default]
    KeepLast,
    KeepFirst,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SegmentNormalization {
    pub trim: bool,
    /// Fold non-ASCII characters to their closest ASCII spelling.
    pub transliterate: bool,
    pub case: Option<SegmentCase>,
}

impl SegmentNormalization {
    pub fn apply(&self, segment: &str) -> String {
        let mut segment = if self.trim {
            segment.trim().to_string()
        } else {
            segment.to_string()
        };
        if self.transliterate {
            segment = deunicode::deunicode(&segment);
        }
        match self.case {
            Some(case) => segment.to_case(case.into()),
            None => segment,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentCase {
    Kebab,
    Snake,
    Camel,
    Pascal,
    Lower,
    Upper,
}

impl From<SegmentCase> for Case {
    fn from(case: SegmentCase) -> Self {
        match case {
            SegmentCase::Kebab => Case::Kebab,
            SegmentCase::Snake => Case::Snake,
            SegmentCase::Camel => Case::Camel,
            SegmentCase::Pascal => Case::Pascal,
            SegmentCase::Lower => Case::Lower,
            SegmentCase::Upper => Case::Upper,
        }
    }
}
