//! Format adapters turning decoded design documents into flat token records.
//!
//! Every adapter reads an already decoded JSON document (sketch2json output,
//! a Figma REST file response, an Adobe XD `graphicContent.agc`) and returns a
//! [`TokenSet`]. Nothing here touches the file system or the network.

mod adobexd;
mod figma;
mod sketch;

use design_tokens_export_core::TokenRecord;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::format::DesignFormat;

pub use adobexd::AdobeXdAdapter;
pub use figma::FigmaAdapter;
pub use sketch::SketchAdapter;

pub const DEFAULT_PRIMITIVES_PAGE: &str = "primitives";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdapterConfig {
    /// Read colors from the `colors` artboard instead of the document assets.
    pub use_color_artboards: bool,
    /// Read gradients from the `gradients` artboard instead of the document assets.
    pub use_gradient_artboards: bool,
    /// Name of the page holding the token artboards, compared case-insensitively.
    pub primitives_page: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            use_color_artboards: false,
            use_gradient_artboards: false,
            primitives_page: DEFAULT_PRIMITIVES_PAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Grid {
    #[serde(serialize_with = "serialize_number")]
    pub size: f64,
}

impl Grid {
    /// Grid of `size` when it is numeric and non-zero.
    pub fn from_size(size: &Value) -> Option<Grid> {
        let size = match size {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse().ok()?,
            _ => return None,
        };
        (size.is_finite() && size != 0.0).then_some(Grid { size })
    }
}

/// Everything an adapter extracts from one document. Every record carries an
/// `id` attribute holding its `/`-separated token name.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSet {
    pub colors: Vec<TokenRecord>,
    pub gradients: Vec<TokenRecord>,
    pub text_styles: Vec<TokenRecord>,
    pub shadows: Vec<TokenRecord>,
    pub borders: Vec<TokenRecord>,
    pub blurs: Vec<TokenRecord>,
    pub fonts: Vec<String>,
    pub grid: Option<Grid>,
    pub version: String,
    pub file_type: DesignFormat,
}

impl TokenSet {
    pub fn empty(file_type: DesignFormat) -> Self {
        Self {
            colors: Vec::new(),
            gradients: Vec::new(),
            text_styles: Vec::new(),
            shadows: Vec::new(),
            borders: Vec::new(),
            blurs: Vec::new(),
            fonts: Vec::new(),
            grid: None,
            version: String::new(),
            file_type,
        }
    }
}

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error(
        "no `{page}` page found in the {format} document, skipping export of tokens; \
         put the token artboards on a page named `{page}`"
    )]
    NoPrimitivesPage { format: DesignFormat, page: String },
    #[error("the {format} document has no `{field}`")]
    MissingField {
        format: DesignFormat,
        field: &'static str,
    },
}

pub trait TokenAdapter {
    fn extract_tokens(&self, document: &Value) -> Result<TokenSet, AdapterError>;
}

#[derive(Debug, Clone)]
pub enum Adapter {
    Sketch(SketchAdapter),
    Figma(FigmaAdapter),
    AdobeXd(AdobeXdAdapter),
}

impl Adapter {
    pub fn for_format(format: DesignFormat, config: &AdapterConfig) -> Self {
        match format {
            DesignFormat::Sketch => Adapter::Sketch(SketchAdapter::new(config.clone())),
            DesignFormat::Figma => Adapter::Figma(FigmaAdapter::new(config.clone())),
            DesignFormat::AdobeXd => Adapter::AdobeXd(AdobeXdAdapter),
        }
    }

}

impl TokenAdapter for Adapter {
    fn extract_tokens(&self, document: &Value) -> Result<TokenSet, AdapterError> {
        match self {
            Adapter::Sketch(adapter) => adapter.extract_tokens(document),
            Adapter::Figma(adapter) => adapter.extract_tokens(document),
            Adapter::AdobeXd(adapter) => adapter.extract_tokens(document),
        }
    }
}

fn serialize_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

fn array<'v>(value: &'v Value, pointer: &str) -> &'v [Value] {
    value
        .pointer(pointer)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn name_of(value: &Value) -> Option<&str> {
    value.get("name").and_then(Value::as_str)
}

fn has_name(value: &Value, name: &str) -> bool {
    name_of(value).map_or(false, |n| n.trim().eq_ignore_ascii_case(name))
}

/// Starts a record named `id`; `name` repeats it for readers of the dump and
/// of diagnostics. Adapters whose layer names differ from the id overwrite it.
fn token(id: &str) -> Map<String, Value> {
    let mut attributes = Map::new();
    attributes.insert("id".to_string(), Value::from(id));
    attributes.insert("name".to_string(), Value::from(id));
    attributes
}

fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Map<String, Value> {
    let mut color = Map::new();
    color.insert("red".to_string(), Value::from(red));
    color.insert("green".to_string(), Value::from(green));
    color.insert("blue".to_string(), Value::from(blue));
    color.insert("alpha".to_string(), Value::from(alpha));
    color
}

fn copy(from: &Value, key: &str, to: &mut Map<String, Value>, as_key: &str) {
    if let Some(value) = from.get(key).filter(|value| !value.is_null()) {
        to.insert(as_key.to_string(), value.clone());
    }
}
