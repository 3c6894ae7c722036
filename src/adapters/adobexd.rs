use design_tokens_export_core::TokenRecord;
use itertools::Itertools;
use serde_json::Value;

use super::{array, copy, name_of, rgba, token, AdapterError, TokenAdapter, TokenSet};
use crate::format::DesignFormat;

/// Reads the `graphicContent.agc` document of an unpacked `.xd` archive.
/// Only the document library (color swatches and character styles) carries
/// tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdobeXdAdapter;

impl TokenAdapter for AdobeXdAdapter {
    fn extract_tokens(&self, document: &Value) -> Result<TokenSet, AdapterError> {
        let library = document
            .pointer("/resources/meta/ux")
            .ok_or(AdapterError::MissingField {
                format: DesignFormat::AdobeXd,
                field: "resources.meta.ux",
            })?;
        let character_styles = array(library, "/characterStyles");

        let mut tokens = TokenSet::empty(DesignFormat::AdobeXd);
        tokens.colors = array(library, "/colorSwatches")
            .iter()
            .filter_map(swatch)
            .collect();
        tokens.text_styles = character_styles.iter().filter_map(character_style).collect();
        tokens.fonts = character_styles
            .iter()
            .filter_map(|style| style.pointer("/style/font/postscriptName"))
            .filter_map(Value::as_str)
            .unique()
            .map(str::to_string)
            .collect();
        tokens.version = document
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Ok(tokens)
    }
}

/// Swatch channels come as `0..=255`.
fn swatch(swatch: &Value) -> Option<TokenRecord> {
    let color = swatch.get("value")?;
    let channel = |key: &str| {
        color
            .pointer(&format!("/value/{key}"))
            .and_then(Value::as_f64)
            .map(|c| c / 255.0)
    };
    let mut record = token(name_of(swatch)?);
    record.extend(rgba(
        channel("r")?,
        channel("g")?,
        channel("b")?,
        color.get("alpha").and_then(Value::as_f64).unwrap_or(1.0),
    ));
    Some(TokenRecord::new(record))
}

fn character_style(style: &Value) -> Option<TokenRecord> {
    let mut record = token(name_of(style)?);
    let font = style.pointer("/style/font")?;
    copy(font, "postscriptName", &mut record, "font");
    copy(font, "family", &mut record, "fontFamily");
    copy(font, "style", &mut record, "fontStyle");
    copy(font, "size", &mut record, "size");
    if let Some(text) = style.pointer("/style/textAttributes") {
        copy(text, "lineHeight", &mut record, "lineHeight");
        copy(text, "letterSpacing", &mut record, "letterSpacing");
    }
    Some(TokenRecord::new(record))
}
