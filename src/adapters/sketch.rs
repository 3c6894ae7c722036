use design_tokens_export_core::TokenRecord;
use itertools::Itertools;
use serde_json::{Map, Value};

use super::{
    array, copy, has_name, name_of, rgba, token, AdapterConfig, AdapterError, Grid, TokenAdapter,
    TokenSet,
};
use crate::format::DesignFormat;

/// Reads sketch2json output: `{ document, meta, pages }`.
#[derive(Debug, Clone)]
pub struct SketchAdapter {
    config: AdapterConfig,
}

impl SketchAdapter {
    pub fn new(config: AdapterConfig) -> Self {
        Self { config }
    }
}

impl TokenAdapter for SketchAdapter {
    fn extract_tokens(&self, document: &Value) -> Result<TokenSet, AdapterError> {
        let page = &self.config.primitives_page;
        let primitives = pages(document)
            .find(|p| has_name(p, page))
            .ok_or_else(|| AdapterError::NoPrimitivesPage {
                format: DesignFormat::Sketch,
                page: page.clone(),
            })?;
        let layers = array(primitives, "/layers");

        let colors = if self.config.use_color_artboards {
            artboard_tokens(layers, "colors", |layer| {
                first_enabled(layer, "/style/fills")?
                    .get("color")
                    .and_then(color)
            })
        } else {
            color_assets(document)
        };
        let gradients = if self.config.use_gradient_artboards {
            artboard_tokens(layers, "gradients", |layer| {
                let gradient = first_enabled(layer, "/style/fills")?.get("gradient")?;
                gradient.as_object().cloned()
            })
        } else {
            gradient_assets(document)
        };

        Ok(TokenSet {
            colors,
            gradients,
            text_styles: array(document, "/document/layerTextStyles/objects")
                .iter()
                .filter_map(text_style)
                .collect(),
            shadows: artboard_tokens(layers, "shadows", shadow),
            borders: artboard_tokens(layers, "borders", |layer| {
                let border = first_enabled(layer, "/style/borders")?;
                let mut attributes = Map::new();
                copy(border, "thickness", &mut attributes, "width");
                if let Some(c) = border.get("color").and_then(color) {
                    attributes.insert("color".to_string(), Value::Object(c));
                }
                Some(attributes)
            }),
            blurs: artboard_tokens(layers, "blurs", |layer| {
                let blur = layer.pointer("/style/blur")?;
                if blur.get("isEnabled") == Some(&Value::Bool(false)) {
                    return None;
                }
                let mut attributes = Map::new();
                copy(blur, "radius", &mut attributes, "radius");
                Some(attributes)
            }),
            fonts: array(document, "/meta/fonts")
                .iter()
                .filter_map(Value::as_str)
                .unique()
                .map(str::to_string)
                .collect(),
            grid: layers
                .first()
                .and_then(|layer| layer.pointer("/grid/gridSize"))
                .and_then(Grid::from_size),
            version: document
                .pointer("/meta/appVersion")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            file_type: DesignFormat::Sketch,
        })
    }
}

/// sketch2json keys pages by object id; older dumps use a plain array.
fn pages(document: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match document.get("pages") {
        Some(Value::Object(pages)) => Box::new(pages.values()),
        Some(Value::Array(pages)) => Box::new(pages.iter()),
        _ => Box::new(std::iter::empty()),
    }
}

fn color(value: &Value) -> Option<Map<String, Value>> {
    let channel = |key: &str| value.get(key).and_then(Value::as_f64);
    Some(rgba(
        channel("red")?,
        channel("green")?,
        channel("blue")?,
        channel("alpha").unwrap_or(1.0),
    ))
}

fn first_enabled<'v>(layer: &'v Value, pointer: &str) -> Option<&'v Value> {
    array(layer, pointer)
        .iter()
        .find(|item| item.get("isEnabled") != Some(&Value::Bool(false)))
}

/// One record per child layer of the artboard named `artboard`. Layers for
/// which `attributes` finds nothing are skipped.
fn artboard_tokens<F>(layers: &[Value], artboard: &str, attributes: F) -> Vec<TokenRecord>
where
    F: Fn(&Value) -> Option<Map<String, Value>>,
{
    layers
        .iter()
        .filter(|layer| has_name(layer, artboard))
        .flat_map(|board| array(board, "/layers"))
        .filter_map(|layer| {
            let mut record = token(name_of(layer)?);
            record.extend(attributes(layer)?);
            Some(TokenRecord::new(record))
        })
        .collect()
}

fn color_assets(document: &Value) -> Vec<TokenRecord> {
    array(document, "/document/assets/colorAssets")
        .iter()
        .filter_map(|asset| {
            let mut record = token(name_of(asset)?);
            record.extend(asset.get("color").and_then(color)?);
            copy(asset, "_class", &mut record, "_class");
            Some(TokenRecord::new(record))
        })
        .collect()
}

fn gradient_assets(document: &Value) -> Vec<TokenRecord> {
    array(document, "/document/assets/gradientAssets")
        .iter()
        .filter_map(|asset| {
            let mut record = token(name_of(asset)?);
            record.extend(asset.get("gradient")?.as_object()?.clone());
            copy(asset, "_class", &mut record, "_class");
            Some(TokenRecord::new(record))
        })
        .collect()
}

fn text_style(style: &Value) -> Option<TokenRecord> {
    let mut record = token(name_of(style)?);
    let attributes = style.pointer("/value/textStyle/encodedAttributes")?;
    if let Some(font) = attributes.pointer("/MSAttributedStringFontAttribute/attributes") {
        copy(font, "name", &mut record, "font");
        copy(font, "size", &mut record, "size");
    }
    if let Some(c) = attributes
        .get("MSAttributedStringColorAttribute")
        .and_then(color)
    {
        record.insert("color".to_string(), Value::Object(c));
    }
    if let Some(paragraph) = attributes.get("paragraphStyle") {
        copy(paragraph, "maximumLineHeight", &mut record, "lineHeight");
    }
    copy(attributes, "kerning", &mut record, "letterSpacing");
    Some(TokenRecord::new(record))
}

fn shadow(layer: &Value) -> Option<Map<String, Value>> {
    let (shadow, inner) = match first_enabled(layer, "/style/shadows") {
        Some(shadow) => (shadow, false),
        None => (first_enabled(layer, "/style/innerShadows")?, true),
    };
    let mut attributes = Map::new();
    copy(shadow, "offsetX", &mut attributes, "x");
    copy(shadow, "offsetY", &mut attributes, "y");
    copy(shadow, "blurRadius", &mut attributes, "blur");
    copy(shadow, "spread", &mut attributes, "spread");
    if let Some(c) = shadow.get("color").and_then(color) {
        attributes.insert("color".to_string(), Value::Object(c));
    }
    attributes.insert("inner".to_string(), Value::Bool(inner));
    Some(attributes)
}
