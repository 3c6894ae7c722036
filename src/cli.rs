//! Command line entry point. The binary only installs logging and calls
//! [`Cli::run`].

use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    adapters::{Adapter, TokenAdapter},
    config::ExportConfig,
    error::ExportError,
    export::export_tokens,
    format::DesignFormat,
};

/// Export design tokens from a decoded Sketch, Figma or Adobe XD document.
#[derive(Debug, Parser)]
#[command(name = "design-tokens-export", version)]
pub struct Cli {
    /// JSON document to read (sketch2json output, Figma file response or XD graphicContent.agc).
    pub input: PathBuf,
    #[arg(long, default_value = "build")]
    pub output_dir: PathBuf,
    /// JSON configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Skip format sniffing.
    #[arg(long, value_enum)]
    pub format: Option<DesignFormat>,
    /// Also write the input document next to the export.
    #[arg(long)]
    pub dump: bool,
    #[arg(long)]
    pub use_color_artboards: bool,
    #[arg(long)]
    pub use_gradient_artboards: bool,
    /// Fail when any token was skipped or overridden.
    #[arg(long)]
    pub strict: bool,
}

impl Cli {
    /// The configuration file, or the defaults, with the switches on top.
    /// Switches only ever turn settings on.
    pub fn config(&self) -> Result<ExportConfig, ExportError> {
        let mut config = match &self.config {
            Some(path) => ExportConfig::load(path)?,
            None => ExportConfig::default(),
        };
        config.adapter.use_color_artboards |= self.use_color_artboards;
        config.adapter.use_gradient_artboards |= self.use_gradient_artboards;
        config.fail_on_diagnostics |= self.strict;
        Ok(config)
    }

    /// Reads, exports and writes. The export file is written even when strict
    /// mode then fails the run on diagnostics.
    pub fn run(&self) -> Result<(), ExportError> {
        let config = self.config()?;

        let data = fs::read_to_string(&self.input).map_err(|source| ExportError::Read {
            path: self.input.clone(),
            source,
        })?;
        let document: Value = serde_json::from_str(&data).map_err(|source| ExportError::Json {
            path: self.input.clone(),
            source,
        })?;

        let format = self
            .format
            .or_else(|| DesignFormat::sniff(&self.input, &document))
            .ok_or_else(|| ExportError::UnknownFormat(self.input.clone()))?;
        info!(%format, input = %self.input.display(), "reading design tokens");

        let tokens = Adapter::for_format(format, &config.adapter).extract_tokens(&document)?;
        debug!(
            colors = tokens.colors.len(),
            gradients = tokens.gradients.len(),
            text_styles = tokens.text_styles.len(),
            shadows = tokens.shadows.len(),
            borders = tokens.borders.len(),
            blurs = tokens.blurs.len(),
            fonts = tokens.fonts.len(),
            "extracted tokens"
        );

        let export = export_tokens(&tokens, &config.grouping)?;
        for diagnostic in &export.diagnostics {
            warn!(category = diagnostic.category, "{}", diagnostic.diagnostic);
        }

        fs::create_dir_all(&self.output_dir).map_err(|source| ExportError::Write {
            path: self.output_dir.clone(),
            source,
        })?;
        let output = self.output_dir.join(&config.output_file);
        write_json(&output, &export)?;
        info!(
            output = %output.display(),
            tokens = export.tokens.leaf_count(),
            "wrote design tokens"
        );

        if self.dump {
            let dump = self.output_dir.join(&config.dump_file);
            write_json(&dump, &document)?;
            info!(output = %dump.display(), "wrote document dump");
        }

        if config.fail_on_diagnostics && !export.diagnostics.is_empty() {
            return Err(ExportError::Diagnostics(export.diagnostics.len()));
        }
        Ok(())
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(value).map_err(ExportError::Serialize)?;
    fs::write(path, json).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}
