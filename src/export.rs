use std::{fmt, thread};

use design_tokens_export_core::{
    style_dictionary::{
        self, map_blurs, map_border_style_sizes, map_colors, map_gradients, map_shadows,
        map_text_style_sizes,
    },
    Diagnostic, GroupedTree, GroupingError, GroupingPolicy, TokenRecord, TreeNode,
};
use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    adapters::{Grid, TokenSet},
    error::ExportError,
    format::DesignFormat,
};

type Mapper = fn(&[TokenRecord], &GroupingPolicy) -> Result<GroupedTree, GroupingError>;

/// The document written for Style Dictionary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Export {
    pub tokens: TreeNode,
    pub fonts: Vec<String>,
    pub grid: Option<Grid>,
    pub version: String,
    pub file_type: DesignFormat,
    #[serde(skip)]
    pub diagnostics: Vec<CategoryDiagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDiagnostic {
    pub category: &'static str,
    pub diagnostic: Diagnostic,
}

impl fmt::Display for CategoryDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.diagnostic)
    }
}

/// Groups every token category of `tokens` and merges them into one tree.
///
/// Categories share nothing, so each one is grouped on its own thread.
/// Categories without tokens are left out of the tree.
pub fn export_tokens(tokens: &TokenSet, policy: &GroupingPolicy) -> Result<Export, ExportError> {
    let categories: [(&'static str, &[TokenRecord], Mapper); 6] = [
        (style_dictionary::FONT, &tokens.text_styles, map_text_style_sizes),
        (style_dictionary::BORDER, &tokens.borders, map_border_style_sizes),
        (style_dictionary::COLOR, &tokens.colors, map_colors),
        (style_dictionary::GRADIENT, &tokens.gradients, map_gradients),
        (style_dictionary::SHADOW, &tokens.shadows, map_shadows),
        (style_dictionary::BLUR, &tokens.blurs, map_blurs),
    ];

    let results: Vec<(&'static str, Result<GroupedTree, GroupingError>)> = thread::scope(|scope| {
        let handles: Vec<_> = categories
            .into_iter()
            .filter(|(_, records, _)| !records.is_empty())
            .map(|(category, records, mapper)| {
                (category, scope.spawn(move || mapper(records, policy)))
            })
            .collect();
        handles
            .into_iter()
            .map(|(category, handle)| {
                let result = handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
                (category, result)
            })
            .collect()
    });

    let mut root = IndexMap::new();
    let mut diagnostics = Vec::new();
    for (category, result) in results {
        let grouped = result.map_err(|source| ExportError::Grouping { category, source })?;
        diagnostics.extend(
            grouped
                .diagnostics
                .into_iter()
                .map(|diagnostic| CategoryDiagnostic {
                    category,
                    diagnostic,
                }),
        );
        if let TreeNode::Group(wrapped) = grouped.tree {
            root.extend(wrapped);
        }
    }

    Ok(Export {
        tokens: TreeNode::Group(root),
        fonts: tokens.fonts.clone(),
        grid: tokens.grid,
        version: tokens.version.clone(),
        file_type: tokens.file_type,
        diagnostics,
    })
}
