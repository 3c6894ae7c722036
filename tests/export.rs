use std::path::Path;

use design_tokens_export::{
    export::CategoryDiagnostic, export_tokens, Adapter, AdapterConfig, DesignFormat, ExportError,
    TokenAdapter, TokenSet,
};
use design_tokens_export_core::{Diagnostic, GroupingError, GroupingPolicy, TokenRecord};
use serde_json::{json, Value};

fn sketch_document() -> Value {
    json!({
        "meta": { "appVersion": "52.2", "fonts": ["Roboto-Bold"] },
        "document": {
            "assets": {
                "colorAssets": [
                    { "name": "brand/primary", "color": { "red": 1, "green": 0, "blue": 0, "alpha": 1 } },
                    { "name": "brand/secondary", "color": { "red": 0, "green": 0, "blue": 1, "alpha": 1 } }
                ],
                "gradientAssets": []
            },
            "layerTextStyles": { "objects": [
                { "name": "size/heading/large", "value": { "textStyle": { "encodedAttributes": {
                    "MSAttributedStringFontAttribute": { "attributes": { "name": "Roboto-Bold", "size": 32 } } } } } },
                { "name": "size/body", "value": { "textStyle": { "encodedAttributes": {
                    "MSAttributedStringFontAttribute": { "attributes": { "name": "Roboto-Regular", "size": 14 } } } } } }
            ] }
        },
        "pages": {
            "P1": { "name": "primitives", "layers": [
                { "name": "borders", "grid": { "gridSize": 4 }, "layers": [
                    { "name": "border/thin", "style": { "borders": [{ "thickness": 1 }] } },
                    { "name": "border/thin", "style": { "borders": [{ "thickness": 2 }] } }
                ] }
            ] }
        }
    })
}

#[test]
fn exports_a_sketch_document() {
    let path = Path::new("library.sketch.json");
    let document = sketch_document();
    let format = DesignFormat::sniff(path, &document).unwrap();
    let tokens = Adapter::for_format(format, &AdapterConfig::default())
        .extract_tokens(&document)
        .unwrap();
    let export = export_tokens(&tokens, &GroupingPolicy::default()).unwrap();

    assert_eq!(
        serde_json::to_value(&export).unwrap(),
        json!({
            "tokens": {
                "font": { "size": { "heading": { "value": "32" }, "body": { "value": "14" } } },
                "border": { "border": { "value": "2" } },
                "color": { "brand": { "primary": { "value": "#ff0000" }, "secondary": { "value": "#0000ff" } } },
            },
            "fonts": ["Roboto-Bold"],
            "grid": { "size": 4 },
            "version": "52.2",
            "fileType": "sketch",
        })
    );
    assert_eq!(
        export.diagnostics,
        vec![CategoryDiagnostic {
            category: "border",
            diagnostic: Diagnostic::ConflictingDefinition {
                name: vec!["border".into(), "thin".into()],
                overridden: 0,
                kept: 1,
            },
        }]
    );
    assert_eq!(
        export.diagnostics[0].to_string(),
        "border: token `border/thin` is defined more than once: #0 was overridden by #1"
    );
}

#[test]
fn categories_keep_a_stable_order() {
    let mut tokens = TokenSet::empty(DesignFormat::Figma);
    let record = |id: &str, value: Value| TokenRecord::from_value(json!({ "id": id, "radius": value.clone(), "width": value })).unwrap();
    tokens.blurs = vec![record("backdrop", json!(10))];
    tokens.borders = vec![record("thin", json!(1))];

    let export = export_tokens(&tokens, &GroupingPolicy::default()).unwrap();
    let categories: Vec<&str> = export
        .tokens
        .children()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(categories, vec!["border", "blur"]);
    assert!(export.diagnostics.is_empty());
}

#[test]
fn ambiguous_names_fail_the_export() {
    let mut tokens = TokenSet::empty(DesignFormat::AdobeXd);
    tokens.text_styles = vec![
        TokenRecord::from_value(json!({ "id": "heading", "size": 24 })).unwrap(),
        TokenRecord::from_value(json!({ "id": "heading/large", "size": 32 })).unwrap(),
    ];
    let err = export_tokens(&tokens, &GroupingPolicy::default()).unwrap_err();
    match err {
        ExportError::Grouping { category, source } => {
            assert_eq!(category, "font");
            assert_eq!(
                source,
                GroupingError::AmbiguousGrouping {
                    path: vec!["heading".into()],
                    leaf: vec!["heading".into()],
                }
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn nameless_tokens_are_reported() {
    let document = json!({
        "document": { "children": [
            { "type": "CANVAS", "name": "Primitives", "children": [
                { "name": "color", "fills": [{ "type": "SOLID", "color": { "r": 0, "g": 0, "b": 0, "a": 1 } }] },
                { "name": "color/ink", "fills": [{ "type": "SOLID", "color": { "r": 0, "g": 0, "b": 0, "a": 1 } }] }
            ] }
        ] }
    });
    let tokens = Adapter::for_format(DesignFormat::Figma, &AdapterConfig::default())
        .extract_tokens(&document)
        .unwrap();
    let export = export_tokens(&tokens, &GroupingPolicy::default()).unwrap();
    assert_eq!(
        serde_json::to_value(&export.tokens).unwrap(),
        json!({ "color": { "ink": { "value": "#000000" } } })
    );
    assert_eq!(
        export.diagnostics,
        vec![CategoryDiagnostic {
            category: "color",
            diagnostic: Diagnostic::InvalidTokenName {
                position: 0,
                label: Some("color".into()),
            },
        }]
    );
    assert_eq!(
        export.diagnostics[0].to_string(),
        "color: token #0 (`color`) has an empty name and was skipped"
    );
}
