//! Exports design tokens from Sketch, Figma and Adobe XD documents as a
//! Style Dictionary token tree.
//!
//! Adapters flatten a decoded design document into token records, and
//! [`export::export_tokens`] groups every category with the least-depth
//! builder of [`design_tokens_export_core`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod format;

pub use adapters::{Adapter, AdapterConfig, TokenAdapter, TokenSet};
pub use config::ExportConfig;
pub use error::ExportError;
pub use export::{export_tokens, Export};
pub use format::DesignFormat;
