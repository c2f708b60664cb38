//! Tree flattening for table rendering.

use crate::directory::{CompanyId, CompanyNode};
use std::collections::HashSet;

/// One row of the flattened parent/child table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatNode {
    pub node: CompanyNode,
    /// Indentation level. Always 0, children included.
    pub depth: u8,
    /// Owning parent for child rows.
    pub parent_id: Option<CompanyId>,
}

impl FlatNode {
    pub fn is_child(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// Emit every parent immediately followed by all of its loaded children.
///
/// `_expanded` is accepted for call-site compatibility but does not gate
/// anything: loaded children are always listed, collapsed or not.
pub fn flatten_for_table(parents: &[CompanyNode], _expanded: &HashSet<CompanyId>) -> Vec<FlatNode> {
    let mut rows = Vec::with_capacity(flat_len(parents));
    for parent in parents {
        rows.push(FlatNode {
            node: parent.clone(),
            depth: 0,
            parent_id: None,
        });
        for child in parent.loaded_children() {
            rows.push(FlatNode {
                node: child.clone(),
                depth: 0,
                parent_id: Some(parent.id.clone()),
            });
        }
    }
    rows
}

/// Row count [`flatten_for_table`] would produce.
pub fn flat_len(parents: &[CompanyNode]) -> usize {
    parents
        .iter()
        .map(|parent| 1 + parent.loaded_children().len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::Status;

    fn parent_with(id: &str, child_count: Option<usize>) -> CompanyNode {
        let mut parent = CompanyNode::parent(id, format!("Parent {id}"), Status::Active);
        parent.children = child_count.map(|count| {
            (0..count)
                .map(|i| {
                    CompanyNode::child(
                        format!("{id}-{:02}", i + 1),
                        format!("Child {i}"),
                        Status::Active,
                        id,
                    )
                })
                .collect()
        });
        parent
    }

    #[test]
    fn test_children_follow_their_parent() {
        let parents = vec![
            parent_with("A", Some(2)),
            parent_with("B", None),
            parent_with("C", Some(1)),
        ];
        let rows = flatten_for_table(&parents, &HashSet::new());

        let ids: Vec<&str> = rows.iter().map(|row| row.node.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "A-01", "A-02", "B", "C", "C-01"]);
        assert_eq!(rows.len(), flat_len(&parents));
        assert_eq!(rows[1].parent_id.as_deref(), Some("A"));
        assert!(!rows[3].is_child());
    }

    #[test]
    fn test_depth_is_zero_everywhere() {
        let rows = flatten_for_table(&[parent_with("A", Some(3))], &HashSet::new());
        assert!(rows.iter().all(|row| row.depth == 0));
    }

    #[test]
    fn test_expansion_flags_do_not_gate_children() {
        let parents = vec![parent_with("A", Some(2))];
        let collapsed = flatten_for_table(&parents, &HashSet::new());
        let expanded = flatten_for_table(&parents, &HashSet::from(["A".to_string()]));
        assert_eq!(collapsed, expanded);
    }
}
