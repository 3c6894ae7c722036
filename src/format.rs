use std::{fmt, path::Path};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Design tool a document was exported from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DesignFormat {
    Sketch,
    Figma,
    #[serde(rename = "adobexd")]
    #[value(name = "adobe-xd")]
    AdobeXd,
}

impl DesignFormat {
    /// Guesses the format from the file name first, then from the shape of the
    /// decoded document.
    pub fn sniff(path: &Path, document: &Value) -> Option<DesignFormat> {
        Self::from_file_name(path).or_else(|| Self::from_document(document))
    }

    pub fn from_file_name(path: &Path) -> Option<DesignFormat> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        if name.ends_with(".sketch") || name.ends_with(".sketch.json") {
            Some(DesignFormat::Sketch)
        } else if name.ends_with(".xd") || name.ends_with(".xd.json") || name.ends_with(".agc") {
            Some(DesignFormat::AdobeXd)
        } else if name.ends_with(".fig.json") || name.ends_with(".figma.json") {
            Some(DesignFormat::Figma)
        } else {
            None
        }
    }

    pub fn from_document(document: &Value) -> Option<DesignFormat> {
        if document.pointer("/document/children").is_some() {
            Some(DesignFormat::Figma)
        } else if document.get("document").is_some() && document.get("pages").is_some() {
            Some(DesignFormat::Sketch)
        } else if document.get("resources").is_some() {
            Some(DesignFormat::AdobeXd)
        } else {
            None
        }
    }
}

impl fmt::Display for DesignFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DesignFormat::Sketch => "Sketch",
            DesignFormat::Figma => "Figma",
            DesignFormat::AdobeXd => "Adobe XD",
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case("design.sketch", Some(DesignFormat::Sketch))]
    #[case("exports/Design.Sketch.json", Some(DesignFormat::Sketch))]
    #[case("library.xd", Some(DesignFormat::AdobeXd))]
    #[case("graphicContent.agc", Some(DesignFormat::AdobeXd))]
    #[case("file.figma.json", Some(DesignFormat::Figma))]
    #[case("tokens.json", None)]
    fn sniffs_file_names(#[case] path: &str, #[case] expected: Option<DesignFormat>) {
        assert_eq!(DesignFormat::from_file_name(Path::new(path)), expected);
    }

    #[rstest]
    #[case(json!({ "document": { "children": [] } }), Some(DesignFormat::Figma))]
    #[case(json!({ "document": {}, "pages": {} }), Some(DesignFormat::Sketch))]
    #[case(json!({ "resources": { "meta": {} } }), Some(DesignFormat::AdobeXd))]
    #[case(json!({ "global": {} }), None)]
    fn sniffs_documents(#[case] document: Value, #[case] expected: Option<DesignFormat>) {
        assert_eq!(DesignFormat::from_document(&document), expected);
    }

    #[test]
    fn file_name_wins_over_document_shape() {
        let figma_like = json!({ "document": { "children": [] } });
        assert_eq!(
            DesignFormat::sniff(Path::new("export.sketch.json"), &figma_like),
            Some(DesignFormat::Sketch)
        );
        assert_eq!(
            DesignFormat::sniff(Path::new("export.json"), &figma_like),
            Some(DesignFormat::Figma)
        );
    }
}
