//! Least-depth grouping of design tokens into Style Dictionary trees.
//!
//! The crate is a pure in-memory transform: format adapters hand over flat
//! [`TokenRecord`]s, [`build_least_depth_tree`] nests them as shallowly as
//! their names allow, and the category mappers in [`style_dictionary`] wrap
//! the result under names such as `font` or `border`.

mod builder;
pub mod diagnostics;
mod extract;
pub mod output;
pub mod policy;
mod record;
pub mod selector;
pub mod style_dictionary;
pub mod tree;

pub use builder::{build_least_depth_tree, GroupedTree};
pub use diagnostics::{Diagnostic, GroupingError, InvalidTokenName};
pub use extract::KeyPathExtractor;
pub use output::wrap_category;
pub use policy::{ConflictResolution, GroupingPolicy, SegmentCase, SegmentNormalization};
pub use record::TokenRecord;
pub use selector::{KeyPathSelector, SelectorError};
pub use tree::{LeafValue, TreeNode};
