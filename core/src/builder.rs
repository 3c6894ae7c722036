//! Least-depth grouping.
//!
//! Records are partitioned by their first remaining segment. A partition with
//! a single record becomes a leaf right there, whatever is left of its name;
//! larger partitions become a group and are partitioned again on the next
//! segment. Branches therefore stop at the first level where they are unique
//! and the tree is not uniform in depth.

use indexmap::{map::Entry, IndexMap};
use serde_json::Value;

use crate::{
    diagnostics::{Diagnostic, GroupingError},
    extract::KeyPathExtractor,
    policy::{ConflictResolution, GroupingPolicy},
    record::TokenRecord,
    tree::{LeafValue, TreeNode},
};

/// Output of one grouping call.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedTree {
    pub tree: TreeNode,
    pub diagnostics: Vec<Diagnostic>,
}

/// A record whose grouping name has been resolved.
#[derive(Debug, Clone)]
struct NamedToken<'a> {
    position: usize,
    name: Vec<String>,
    record: &'a TokenRecord,
}

struct Member<'t> {
    remaining: &'t [String],
    index: usize,
}

/// Builds the shallowest tree that keeps every distinct record addressable.
///
/// Records with an empty name and overridden duplicates are reported in
/// [`GroupedTree::diagnostics`]. A label that would have to be both a leaf and
/// a group aborts the whole call.
pub fn build_least_depth_tree<F>(
    tokens: &[TokenRecord],
    policy: &GroupingPolicy,
    leaf_transform: F,
) -> Result<GroupedTree, GroupingError>
where
    F: Fn(&TokenRecord) -> LeafValue,
{
    let mut diagnostics = Vec::new();
    let extractor = KeyPathExtractor::new(policy);

    let mut named = Vec::with_capacity(tokens.len());
    for (position, record) in tokens.iter().enumerate() {
        match extractor.extract(record) {
            Ok(name) => named.push(NamedToken {
                position,
                name,
                record,
            }),
            Err(_) => diagnostics.push(Diagnostic::InvalidTokenName {
                position,
                label: record
                    .get("name")
                    .and_then(Value::as_str)
                    .filter(|label| !label.is_empty())
                    .map(str::to_string),
            }),
        }
    }

    let distinct = deduplicate(named, policy.conflict_resolution, &mut diagnostics);
    let members = distinct
        .iter()
        .enumerate()
        .map(|(index, token)| Member {
            remaining: &token.name,
            index,
        })
        .collect();
    let layout = lay_out(members, &distinct, &mut Vec::new())?;
    let tree = layout.map_leaves(&mut |index: usize| leaf_transform(distinct[index].record));

    Ok(GroupedTree { tree, diagnostics })
}

/// Collapses records sharing a full name. Identical records merge silently,
/// differing ones are resolved by `resolution` and reported. The surviving
/// record takes the slot of the first occurrence.
fn deduplicate<'a>(
    named: Vec<NamedToken<'a>>,
    resolution: ConflictResolution,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<NamedToken<'a>> {
    let mut distinct: IndexMap<Vec<String>, NamedToken<'a>> = IndexMap::with_capacity(named.len());
    for token in named {
        match distinct.entry(token.name.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(token);
            }
            Entry::Occupied(mut entry) => {
                if entry.get().record == token.record {
                    continue;
                }
                let (overridden, kept) = match resolution {
                    ConflictResolution::KeepLast => {
                        let kept = token.position;
                        (entry.insert(token).position, kept)
                    }
                    ConflictResolution::KeepFirst => (token.position, entry.get().position),
                };
                diagnostics.push(Diagnostic::ConflictingDefinition {
                    name: entry.key().clone(),
                    overridden,
                    kept,
                });
            }
        }
    }
    distinct.into_iter().map(|(_, token)| token).collect()
}

fn lay_out<'t>(
    members: Vec<Member<'t>>,
    distinct: &[NamedToken<'_>],
    prefix: &mut Vec<String>,
) -> Result<TreeNode<usize>, GroupingError> {
    let mut partitions: IndexMap<&'t str, Vec<Member<'t>>> = IndexMap::new();
    for member in members {
        // names are non-empty and exhausted members are rejected before recursing
        if let Some((head, _)) = member.remaining.split_first() {
            partitions.entry(head.as_str()).or_default().push(member);
        }
    }

    let mut children = IndexMap::with_capacity(partitions.len());
    for (label, mut partition) in partitions {
        let node = if partition.len() == 1 {
            TreeNode::Leaf(partition.remove(0).index)
        } else {
            prefix.push(label.to_string());
            let stripped: Vec<Member<'t>> = partition
                .into_iter()
                .map(|member| Member {
                    remaining: &member.remaining[1..],
                    index: member.index,
                })
                .collect();
            if let Some(exhausted) = stripped.iter().find(|member| member.remaining.is_empty()) {
                return Err(GroupingError::AmbiguousGrouping {
                    path: prefix.clone(),
                    leaf: distinct[exhausted.index].name.clone(),
                });
            }
            let node = lay_out(stripped, distinct, prefix)?;
            prefix.pop();
            node
        };
        children.insert(label.to_string(), node);
    }
    Ok(TreeNode::Group(children))
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    fn token(id: &str, size: u32) -> TokenRecord {
        TokenRecord::default().with("id", id).with("size", size)
    }

    fn size_leaf(record: &TokenRecord) -> Value {
        json!({ "value": record.get("size").map(Value::to_string).unwrap_or_default() })
    }

    fn build(tokens: &[TokenRecord]) -> Result<GroupedTree, GroupingError> {
        build_least_depth_tree(tokens, &GroupingPolicy::default(), size_leaf)
    }

    fn tree_json(grouped: &GroupedTree) -> Value {
        serde_json::to_value(&grouped.tree).unwrap()
    }

    #[test]
    fn siblings_share_a_group() {
        let grouped = build(&[token("size/small", 10), token("size/medium", 14)]).unwrap();
        assert_eq!(
            tree_json(&grouped),
            json!({ "size": { "small": { "value": "10" }, "medium": { "value": "14" } } })
        );
        assert!(grouped.diagnostics.is_empty());
    }

    #[test]
    fn lone_token_collapses_to_its_first_segment() {
        let grouped = build(&[token("size/small/compact", 10)]).unwrap();
        assert_eq!(tree_json(&grouped), json!({ "size": { "value": "10" } }));
    }

    #[test]
    fn branches_stop_at_different_depths() {
        let grouped = build(&[
            token("size/heading/large", 32),
            token("size/heading/small", 24),
            token("size/body/regular", 14),
            token("radius/default", 4),
        ])
        .unwrap();
        assert_eq!(
            tree_json(&grouped),
            json!({
                "size": {
                    "heading": { "large": { "value": "32" }, "small": { "value": "24" } },
                    "body": { "value": "14" },
                },
                "radius": { "value": "4" },
            })
        );
    }

    #[test]
    fn conflicting_definitions_keep_the_last() {
        let border = |width: u32| TokenRecord::default().with("id", "border/thin").with("width", width);
        let grouped = build_least_depth_tree(
            &[border(1), border(2)],
            &GroupingPolicy::default(),
            |record| json!({ "value": record.get("width").map(Value::to_string).unwrap_or_default() }),
        )
        .unwrap();
        assert_eq!(tree_json(&grouped), json!({ "border": { "value": "2" } }));
        assert_eq!(
            grouped.diagnostics,
            vec![Diagnostic::ConflictingDefinition {
                name: vec!["border".into(), "thin".into()],
                overridden: 0,
                kept: 1,
            }]
        );
    }

    #[test]
    fn conflicting_definitions_can_keep_the_first() {
        let policy = GroupingPolicy::default().with_conflict_resolution(ConflictResolution::KeepFirst);
        let grouped = build_least_depth_tree(
            &[token("size/small", 10), token("size/small", 12), token("size/large", 20)],
            &policy,
            size_leaf,
        )
        .unwrap();
        assert_eq!(
            tree_json(&grouped),
            json!({ "size": { "small": { "value": "10" }, "large": { "value": "20" } } })
        );
        assert_eq!(
            grouped.diagnostics,
            vec![Diagnostic::ConflictingDefinition {
                name: vec!["size".into(), "small".into()],
                overridden: 1,
                kept: 0,
            }]
        );
    }

    #[test]
    fn exact_duplicates_merge_silently() {
        let once = build(&[token("size/small", 10), token("size/medium", 14)]).unwrap();
        let twice = build(&[
            token("size/small", 10),
            token("size/small", 10),
            token("size/medium", 14),
        ])
        .unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_names_are_reported_and_skipped() {
        let grouped = build(&[
            token("", 10),
            token("size/small", 12),
            token("//", 14).with("name", "Heading"),
        ])
        .unwrap();
        assert_eq!(tree_json(&grouped), json!({ "size": { "value": "12" } }));
        assert_eq!(
            grouped.diagnostics,
            vec![
                Diagnostic::InvalidTokenName {
                    position: 0,
                    label: None,
                },
                Diagnostic::InvalidTokenName {
                    position: 2,
                    label: Some("Heading".into()),
                },
            ]
        );
    }

    #[test]
    fn leaf_and_group_on_one_label_is_ambiguous() {
        assert_eq!(
            build(&[token("a", 1), token("a/b", 2)]),
            Err(GroupingError::AmbiguousGrouping {
                path: vec!["a".into()],
                leaf: vec!["a".into()],
            })
        );
        assert_eq!(
            build(&[token("x/a/b", 1), token("x/a", 2), token("y", 3)]),
            Err(GroupingError::AmbiguousGrouping {
                path: vec!["x".into(), "a".into()],
                leaf: vec!["x".into(), "a".into()],
            })
        );
    }

    #[test]
    fn labels_are_case_sensitive() {
        let grouped = build(&[token("Size/small", 10), token("size/small", 12)]).unwrap();
        assert_eq!(
            tree_json(&grouped),
            json!({ "Size": { "value": "10" }, "size": { "value": "12" } })
        );
    }

    #[test]
    fn empty_input_builds_an_empty_tree() {
        let grouped = build(&[]).unwrap();
        assert_eq!(tree_json(&grouped), json!({}));
        assert!(grouped.diagnostics.is_empty());
    }
}
