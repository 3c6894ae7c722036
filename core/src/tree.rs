use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Value stored at a terminal node once the leaf transform ran, typically
/// `{ "value": "10" }`.
pub type LeafValue = Value;

/// A least-depth token tree. Siblings keep the order in which their labels
/// first appeared in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TreeNode<L = LeafValue> {
    Leaf(L),
    Group(IndexMap<String, TreeNode<L>>),
}

impl<L> Default for TreeNode<L> {
    fn default() -> Self {
        TreeNode::Group(IndexMap::new())
    }
}

impl<L> TreeNode<L> {
    pub fn as_leaf(&self) -> Option<&L> {
        match self {
            TreeNode::Leaf(leaf) => Some(leaf),
            TreeNode::Group(_) => None,
        }
    }

    pub fn children(&self) -> Option<&IndexMap<String, TreeNode<L>>> {
        match self {
            TreeNode::Leaf(_) => None,
            TreeNode::Group(children) => Some(children),
        }
    }

    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&TreeNode<L>> {
        path.iter().try_fold(self, |node, label| match node {
            TreeNode::Group(children) => children.get(label.as_ref()),
            TreeNode::Leaf(_) => None,
        })
    }

    /// Number of labels on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 0,
            TreeNode::Group(children) => children
                .values()
                .map(|child| child.depth() + 1)
                .max()
                .unwrap_or(0),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 1,
            TreeNode::Group(children) => children.values().map(TreeNode::leaf_count).sum(),
        }
    }

    /// Every leaf together with the labels leading to it, depth first.
    pub fn leaves(&self) -> Vec<(Vec<&str>, &L)> {
        let mut out = Vec::new();
        self.collect_leaves(&mut Vec::new(), &mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, path: &mut Vec<&'a str>, out: &mut Vec<(Vec<&'a str>, &'a L)>) {
        match self {
            TreeNode::Leaf(leaf) => out.push((path.clone(), leaf)),
            TreeNode::Group(children) => {
                for (label, child) in children {
                    path.push(label);
                    child.collect_leaves(path, out);
                    path.pop();
                }
            }
        }
    }

    pub fn map_leaves<M, F>(self, f: &mut F) -> TreeNode<M>
    where
        F: FnMut(L) -> M,
    {
        match self {
            TreeNode::Leaf(leaf) => TreeNode::Leaf(f(leaf)),
            TreeNode::Group(children) => TreeNode::Group(
                children
                    .into_iter()
                    .map(|(label, child)| (label, child.map_leaves(f)))
                    .collect(),
            ),
        }
    }
}
