use std::{io, path::PathBuf};

use design_tokens_export_core::GroupingError;
use thiserror::Error;

use crate::adapters::AdapterError;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to read `{}`: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write `{}`: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("`{}` is not valid JSON: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("cannot tell which design tool produced `{}`, pass --format", .0.display())]
    UnknownFormat(PathBuf),
    #[error(transparent)]
    Adapter(#[from] AdapterError),
    #[error("cannot group {category} tokens: {source}")]
    Grouping {
        category: &'static str,
        source: GroupingError,
    },
    #[error("{0} token diagnostics reported")]
    Diagnostics(usize),
    #[error("failed to serialize the export: {0}")]
    Serialize(#[source] serde_json::Error),
}
