use indexmap::IndexMap;

use crate::tree::TreeNode;

/// Places `tree` under its semantic category: `{ <category>: <tree> }`.
pub fn wrap_category<L>(category: impl Into<String>, tree: TreeNode<L>) -> TreeNode<L> {
    let mut root = IndexMap::with_capacity(1);
    root.insert(category.into(), tree);
    TreeNode::Group(root)
}
