use itertools::Itertools;
use thiserror::Error;

/// Recoverable findings of a build. The tree is still produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// The record at `position` resolved to an empty grouping name and was
    /// left out of the tree. `label` is its `name` attribute, when it has one.
    #[error(
        "token #{position}{} has an empty name and was skipped",
        .label.as_ref().map(|label| format!(" (`{label}`)")).unwrap_or_default()
    )]
    InvalidTokenName {
        position: usize,
        label: Option<String>,
    },
    /// Two records share `name` but not their attributes. `kept` ended up in
    /// the tree, `overridden` did not.
    #[error(
        "token `{}` is defined more than once: #{overridden} was overridden by #{kept}",
        .name.join("/")
    )]
    ConflictingDefinition {
        name: Vec<String>,
        overridden: usize,
        kept: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupingError {
    /// `path` would have to hold the leaf `leaf` and an interior node at once.
    #[error(
        "label `{}` is both the token `{}` and a group of other tokens",
        .path.iter().join("/"),
        .leaf.iter().join("/")
    )]
    AmbiguousGrouping {
        path: Vec<String>,
        leaf: Vec<String>,
    },
}

/// Returned by the key-path extractor when a record yields no segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("token name resolved to no segments")]
pub struct InvalidTokenName;
