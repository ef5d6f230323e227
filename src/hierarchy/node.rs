//! Scope node and materialized path types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique scope node identifier
pub type NodeId = u64;

/// Materialized ancestor path of a scope node
///
/// A slash-delimited list of ancestor ids ending in the node's own id:
/// root node 5 is `/5/`, its child 9 is `/5/9/`. Prefix relationships on
/// these strings encode ancestry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreePath(String);

impl TreePath {
    /// Path of a root node
    pub fn root(id: NodeId) -> Self {
        Self(format!("/{}/", id))
    }

    /// Path of a child of this node
    pub fn child(&self, id: NodeId) -> Self {
        Self(format!("{}{}/", self.0, id))
    }

    /// Whether this path is a strict ancestor of `other`
    pub fn is_ancestor_of(&self, other: &TreePath) -> bool {
        other.0.len() > self.0.len() && other.0.starts_with(&self.0)
    }

    /// Rewrite this path after its prefix moved
    ///
    /// Only valid when `old_prefix` actually prefixes this path; the tree
    /// guarantees that before calling.
    pub(crate) fn rebase(&self, old_prefix: &TreePath, new_prefix: &TreePath) -> Self {
        debug_assert!(self.0.starts_with(&old_prefix.0));
        Self(format!("{}{}", new_prefix.0, &self.0[old_prefix.0.len()..]))
    }

    /// The raw path string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A hierarchical organizational unit (department)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeNode {
    /// Node identifier
    pub id: NodeId,

    /// Display name (e.g., "Engineering")
    pub name: String,

    /// Parent node, `None` for roots
    pub parent_id: Option<NodeId>,

    /// Materialized ancestor path, maintained by the tree
    pub path: TreePath,

    /// Administrator-set branch flag. Advisory UI metadata only; never
    /// consulted for structural decisions like deletion.
    pub is_branch: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_and_child_paths() {
        let root = TreePath::root(5);
        assert_eq!(root.as_str(), "/5/");

        let child = root.child(9);
        assert_eq!(child.as_str(), "/5/9/");
    }

    #[test]
    fn test_ancestry_is_strict() {
        let root = TreePath::root(5);
        let child = root.child(9);
        let grandchild = child.child(12);

        assert!(root.is_ancestor_of(&child));
        assert!(root.is_ancestor_of(&grandchild));
        assert!(!child.is_ancestor_of(&root));
        assert!(!root.is_ancestor_of(&root));
    }

    #[test]
    fn test_sibling_id_prefixes_do_not_alias() {
        // node 1 vs node 12: "/1/" must not be treated as an ancestor of "/12/"
        let one = TreePath::root(1);
        let twelve = TreePath::root(12);
        assert!(!one.is_ancestor_of(&twelve));
    }

    #[test]
    fn test_rebase() {
        let old_parent = TreePath::root(5).child(9);
        let node = old_parent.child(12);
        let new_parent = TreePath::root(7);

        let rebased = node.rebase(&old_parent, &new_parent.child(9));
        assert_eq!(rebased.as_str(), "/7/9/12/");
    }
}
