use design_tokens_export_core::{
    build_least_depth_tree, GroupedTree, GroupingError, GroupingPolicy, TokenRecord, TreeNode,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn record(segments: &[String], size: u8) -> TokenRecord {
    TokenRecord::default()
        .with("id", segments.join("/"))
        .with("size", size)
}

fn token_lists() -> impl Strategy<Value = Vec<TokenRecord>> {
    let segment = prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(str::to_string);
    let name = prop::collection::vec(segment, 1..4);
    prop::collection::vec((name, 0u8..3), 0..12).prop_map(|entries| {
        entries
            .iter()
            .map(|(segments, size)| record(segments, *size))
            .collect()
    })
}

fn identity_leaf(token: &TokenRecord) -> Value {
    json!({ "id": token.get("id"), "size": token.get("size") })
}

fn build(tokens: &[TokenRecord]) -> Result<GroupedTree, GroupingError> {
    build_least_depth_tree(tokens, &GroupingPolicy::default(), identity_leaf)
}

fn name_of(leaf: &Value) -> Vec<String> {
    leaf["id"]
        .as_str()
        .unwrap()
        .split('/')
        .map(str::to_string)
        .collect()
}

fn non_root_groups_hold_several_leaves(node: &TreeNode, is_root: bool) -> bool {
    match node {
        TreeNode::Leaf(_) => true,
        TreeNode::Group(children) => {
            (is_root || node.leaf_count() >= 2)
                && children
                    .values()
                    .all(|child| non_root_groups_hold_several_leaves(child, false))
        }
    }
}

proptest! {
    #[test]
    fn every_distinct_name_has_exactly_one_leaf(tokens in token_lists()) {
        let Ok(grouped) = build(&tokens) else { return Ok(()); };
        let mut names: Vec<String> = tokens.iter().map(|t| t.get("id").unwrap().to_string()).collect();
        names.sort();
        names.dedup();
        prop_assert_eq!(grouped.tree.leaf_count(), names.len());

        let mut seen = Vec::new();
        for (path, leaf) in grouped.tree.leaves() {
            let name = name_of(leaf);
            prop_assert!(name.len() >= path.len());
            prop_assert!(path.iter().zip(&name).all(|(label, segment)| *label == segment.as_str()));
            prop_assert!(!seen.contains(&name));
            seen.push(name);
        }
    }

    #[test]
    fn no_group_can_be_collapsed(tokens in token_lists()) {
        if let Ok(grouped) = build(&tokens) {
            prop_assert!(non_root_groups_hold_several_leaves(&grouped.tree, true));
        }
    }

    #[test]
    fn building_is_deterministic(tokens in token_lists()) {
        prop_assert_eq!(build(&tokens), build(&tokens));
    }

    #[test]
    fn repeated_records_do_not_change_the_tree(tokens in token_lists()) {
        let doubled: Vec<TokenRecord> = tokens
            .iter()
            .flat_map(|token| [token.clone(), token.clone()])
            .collect();
        match (build(&tokens), build(&doubled)) {
            (Ok(once), Ok(twice)) => {
                prop_assert_eq!(once.tree, twice.tree);
                prop_assert_eq!(once.diagnostics.len(), twice.diagnostics.len());
            }
            (Err(once), Err(twice)) => prop_assert_eq!(once, twice),
            (once, twice) => prop_assert!(false, "{:?} vs {:?}", once, twice),
        }
    }

    #[test]
    fn ambiguity_only_arises_from_prefix_names(tokens in token_lists()) {
        if let Err(GroupingError::AmbiguousGrouping { path, leaf }) = build(&tokens) {
            prop_assert_eq!(&path, &leaf);
            let prefix = format!("{}/", leaf.join("/"));
            let has_longer_name = tokens.iter().any(|t| {
                t.get("id").and_then(Value::as_str).map_or(false, |id| id.starts_with(&prefix))
            });
            prop_assert!(has_longer_name);
        }
    }
}
