use std::{fs, path::Path};

use design_tokens_export_core::GroupingPolicy;
use serde::Deserialize;

use crate::{adapters::AdapterConfig, error::ExportError};

pub const DEFAULT_OUTPUT_FILE: &str = "tokens.json";
pub const DEFAULT_DUMP_FILE: &str = "logdump.json";

/// Settings of one export run, read from a JSON file. Every field has a
/// default so an empty object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportConfig {
    #[serde(flatten)]
    pub adapter: AdapterConfig,
    pub grouping: GroupingPolicy,
    pub output_file: String,
    pub dump_file: String,
    pub fail_on_diagnostics: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            adapter: AdapterConfig::default(),
            grouping: GroupingPolicy::default(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            dump_file: DEFAULT_DUMP_FILE.to_string(),
            fail_on_diagnostics: false,
        }
    }
}

impl ExportConfig {
    pub fn load(path: &Path) -> Result<Self, ExportError> {
        let data = fs::read_to_string(path).map_err(|source| ExportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ExportError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}
