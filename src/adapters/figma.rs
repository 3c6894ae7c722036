use design_tokens_export_core::TokenRecord;
use itertools::Itertools;
use serde_json::{Map, Value};

use super::{array, copy, has_name, rgba, token, AdapterConfig, AdapterError, Grid, TokenAdapter, TokenSet};
use crate::format::DesignFormat;

const API_VERSION: &str = "v1";

/// Reads a Figma REST `GET /v1/files/:key` response.
///
/// Token nodes are found anywhere in the document by name: `color/brand/primary`
/// is a `color` token named `brand/primary`.
#[derive(Debug, Clone)]
pub struct FigmaAdapter {
    config: AdapterConfig,
}

impl FigmaAdapter {
    pub fn new(config: AdapterConfig) -> Self {
        Self { config }
    }
}

impl TokenAdapter for FigmaAdapter {
    fn extract_tokens(&self, document: &Value) -> Result<TokenSet, AdapterError> {
        let root = document
            .get("document")
            .ok_or(AdapterError::MissingField {
                format: DesignFormat::Figma,
                field: "document",
            })?;
        let page = &self.config.primitives_page;
        if !array(root, "/children").iter().any(|p| has_name(p, page)) {
            return Err(AdapterError::NoPrimitivesPage {
                format: DesignFormat::Figma,
                page: page.clone(),
            });
        }

        let mut nodes = Vec::new();
        flatten(root, &mut nodes);
        let collect = |kind: &str, attributes: fn(&Value) -> Option<Map<String, Value>>| {
            tokens_of(&nodes, kind)
                .filter_map(|(id, node)| {
                    let mut record = token(&id);
                    copy(node, "name", &mut record, "name");
                    record.extend(attributes(node)?);
                    Some(TokenRecord::new(record))
                })
                .collect::<Vec<_>>()
        };

        let fonts = tokens_of(&nodes, "text")
            .filter_map(|(_, node)| {
                node.pointer("/children/0/style/fontPostScriptName")
                    .and_then(Value::as_str)
            })
            .unique()
            .map(str::to_string)
            .collect();
        let grid = tokens_of(&nodes, "grid").next().and_then(|(_, node)| {
            array(node, "/layoutGrids")
                .iter()
                .find(|layout| layout.get("pattern").and_then(Value::as_str) == Some("GRID"))
                .and_then(|layout| layout.get("sectionSize"))
                .and_then(Grid::from_size)
        });
        let tokens = TokenSet {
            colors: collect("color", solid_color),
            gradients: collect("gradient", gradient),
            text_styles: collect("textstyle", text_style),
            shadows: collect("shadow", shadow),
            borders: collect("border", border),
            blurs: collect("blur", blur),
            fonts,
            grid,
            version: API_VERSION.to_string(),
            file_type: DesignFormat::Figma,
        };
        Ok(tokens)
    }
}

/// Depth-first, parents before children.
fn flatten<'v>(node: &'v Value, out: &mut Vec<&'v Value>) {
    for child in array(node, "/children") {
        out.push(child);
        flatten(child, out);
    }
}

/// Nodes whose first name segment is `kind`, paired with the remaining
/// segments. Every segment is trimmed, so `Color / brand / overlay` is the
/// color `brand/overlay`.
fn tokens_of<'n, 'v>(
    nodes: &'n [&'v Value],
    kind: &'n str,
) -> impl Iterator<Item = (String, &'v Value)> + 'n {
    nodes.iter().filter_map(move |node| {
        let mut segments = node.get("name")?.as_str()?.split('/').map(str::trim);
        let head = segments.next()?;
        head.eq_ignore_ascii_case(kind)
            .then(|| (segments.join("/"), *node))
    })
}

fn figma_color(color: &Value, opacity: f64) -> Option<Map<String, Value>> {
    let channel = |key: &str| color.get(key).and_then(Value::as_f64);
    Some(rgba(
        channel("r")?,
        channel("g")?,
        channel("b")?,
        channel("a").unwrap_or(1.0) * opacity,
    ))
}

fn visible<'v>(node: &'v Value, pointer: &str, accept: impl Fn(&str) -> bool) -> Option<&'v Value> {
    array(node, pointer).iter().find(|paint| {
        paint.get("visible") != Some(&Value::Bool(false))
            && paint.get("type").and_then(Value::as_str).map_or(false, &accept)
    })
}

fn paint_color(paint: &Value) -> Option<Map<String, Value>> {
    let opacity = paint.get("opacity").and_then(Value::as_f64).unwrap_or(1.0);
    figma_color(paint.get("color")?, opacity)
}

fn solid_color(node: &Value) -> Option<Map<String, Value>> {
    paint_color(visible(node, "/fills", |kind| kind == "SOLID")?)
}

fn gradient(node: &Value) -> Option<Map<String, Value>> {
    let paint = visible(node, "/fills", |kind| kind.starts_with("GRADIENT_"))?;
    let stops = array(paint, "/gradientStops")
        .iter()
        .filter_map(|stop| {
            let mut out = Map::new();
            copy(stop, "position", &mut out, "position");
            out.insert(
                "color".to_string(),
                Value::Object(figma_color(stop.get("color")?, 1.0)?),
            );
            Some(Value::Object(out))
        })
        .collect();
    let mut attributes = Map::new();
    copy(paint, "type", &mut attributes, "gradientType");
    attributes.insert("stops".to_string(), Value::Array(stops));
    Some(attributes)
}

fn text_style(node: &Value) -> Option<Map<String, Value>> {
    let style = node
        .get("style")
        .or_else(|| node.pointer("/children/0/style"))?;
    let mut attributes = Map::new();
    copy(style, "fontPostScriptName", &mut attributes, "font");
    copy(style, "fontFamily", &mut attributes, "fontFamily");
    copy(style, "fontWeight", &mut attributes, "fontWeight");
    copy(style, "fontSize", &mut attributes, "size");
    copy(style, "lineHeightPx", &mut attributes, "lineHeight");
    copy(style, "letterSpacing", &mut attributes, "letterSpacing");
    Some(attributes)
}

fn shadow(node: &Value) -> Option<Map<String, Value>> {
    let effect = visible(node, "/effects", |kind| {
        kind == "DROP_SHADOW" || kind == "INNER_SHADOW"
    })?;
    let mut attributes = Map::new();
    if let Some(offset) = effect.get("offset") {
        copy(offset, "x", &mut attributes, "x");
        copy(offset, "y", &mut attributes, "y");
    }
    copy(effect, "radius", &mut attributes, "blur");
    copy(effect, "spread", &mut attributes, "spread");
    if let Some(c) = effect.get("color").and_then(|c| figma_color(c, 1.0)) {
        attributes.insert("color".to_string(), Value::Object(c));
    }
    attributes.insert(
        "inner".to_string(),
        Value::Bool(effect.get("type").and_then(Value::as_str) == Some("INNER_SHADOW")),
    );
    Some(attributes)
}

fn border(node: &Value) -> Option<Map<String, Value>> {
    let stroke = visible(node, "/strokes", |kind| kind == "SOLID")?;
    let mut attributes = Map::new();
    copy(node, "strokeWeight", &mut attributes, "width");
    attributes.insert("color".to_string(), Value::Object(paint_color(stroke)?));
    Some(attributes)
}

fn blur(node: &Value) -> Option<Map<String, Value>> {
    let effect = visible(node, "/effects", |kind| kind == "LAYER_BLUR")?;
    let mut attributes = Map::new();
    copy(effect, "radius", &mut attributes, "radius");
    Some(attributes)
}
