//! Category mappers producing Style Dictionary trees from adapter tokens.
//!
//! Each mapper groups its tokens with [`build_least_depth_tree`] and wraps the
//! result under the category name the Style Dictionary schema expects.

use csscolorparser::Color;
use serde_json::{json, Map, Value};

use crate::{
    build_least_depth_tree, output::wrap_category, GroupedTree, GroupingError, GroupingPolicy,
    LeafValue, TokenRecord,
};

pub const FONT: &str = "font";
pub const BORDER: &str = "border";
pub const COLOR: &str = "color";
pub const SHADOW: &str = "shadow";
pub const BLUR: &str = "blur";
pub const GRADIENT: &str = "gradient";

pub fn map_text_style_sizes(
    text_styles: &[TokenRecord],
    policy: &GroupingPolicy,
) -> Result<GroupedTree, GroupingError> {
    map_category(FONT, text_styles, policy, |token| value_leaf(stringify(token.get("size"))))
}

pub fn map_border_style_sizes(
    borders: &[TokenRecord],
    policy: &GroupingPolicy,
) -> Result<GroupedTree, GroupingError> {
    map_category(BORDER, borders, policy, |token| value_leaf(stringify(token.get("width"))))
}

/// Colors carry `red`, `green`, `blue` and optionally `alpha`, all in `0..=1`.
pub fn map_colors(
    colors: &[TokenRecord],
    policy: &GroupingPolicy,
) -> Result<GroupedTree, GroupingError> {
    map_category(COLOR, colors, policy, |token| {
        value_leaf(color_hex(token.attributes()).unwrap_or_default())
    })
}

pub fn map_shadows(
    shadows: &[TokenRecord],
    policy: &GroupingPolicy,
) -> Result<GroupedTree, GroupingError> {
    map_category(SHADOW, shadows, policy, |token| value_leaf(css_shadow(token)))
}

pub fn map_blurs(
    blurs: &[TokenRecord],
    policy: &GroupingPolicy,
) -> Result<GroupedTree, GroupingError> {
    map_category(BLUR, blurs, policy, |token| value_leaf(stringify(token.get("radius"))))
}

/// Gradients carry `stops`, each with a `position` in `0..=1` and a `color`.
pub fn map_gradients(
    gradients: &[TokenRecord],
    policy: &GroupingPolicy,
) -> Result<GroupedTree, GroupingError> {
    map_category(GRADIENT, gradients, policy, |token| value_leaf(css_gradient(token)))
}

fn map_category<F>(
    category: &str,
    tokens: &[TokenRecord],
    policy: &GroupingPolicy,
    leaf_transform: F,
) -> Result<GroupedTree, GroupingError>
where
    F: Fn(&TokenRecord) -> LeafValue,
{
    let grouped = build_least_depth_tree(tokens, policy, leaf_transform)?;
    Ok(GroupedTree {
        tree: wrap_category(category, grouped.tree),
        diagnostics: grouped.diagnostics,
    })
}

pub fn value_leaf(value: String) -> LeafValue {
    json!({ "value": value })
}

/// Text form of an attribute as a template literal would print it. Integral
/// floats lose their fraction, missing values print as nothing.
pub fn stringify(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        // `Display` for f64 never prints a trailing `.0` and never saturates.
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if n.is_f64() => format!("{f}"),
            _ => n.to_string(),
        },
        Some(other) => other.to_string(),
    }
}

pub fn color_hex(color: &Map<String, Value>) -> Option<String> {
    let channel = |key: &str| color.get(key).and_then(Value::as_f64);
    let alpha = match color.get("alpha") {
        None | Some(Value::Null) => 1.0,
        Some(value) => value.as_f64()?,
    };
    Some(Color::new(channel("red")?, channel("green")?, channel("blue")?, alpha).to_hex_string())
}

fn css_shadow(token: &TokenRecord) -> String {
    let px = |key: &str| {
        let value = stringify(token.get(key));
        if value.is_empty() {
            "0px".to_string()
        } else {
            format!("{value}px")
        }
    };
    let color = token
        .get("color")
        .and_then(Value::as_object)
        .and_then(color_hex)
        .unwrap_or_else(|| "#000000".to_string());
    let inset = match token.get("inner") {
        Some(Value::Bool(true)) => "inset ",
        _ => "",
    };
    format!(
        "{inset}{} {} {} {} {color}",
        px("x"),
        px("y"),
        px("blur"),
        px("spread")
    )
}

fn css_gradient(token: &TokenRecord) -> String {
    let stops = token
        .get("stops")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .filter_map(|stop| {
            let color = stop.get("color")?.as_object().and_then(color_hex)?;
            let position = stop.get("position").and_then(Value::as_f64).unwrap_or(0.0);
            let percent = (position * 10_000.0).round() / 100.0;
            Some(format!("{color} {}%", stringify(Some(&json!(percent)))))
        })
        .collect::<Vec<_>>();
    format!("linear-gradient({})", stops.join(", "))
}
