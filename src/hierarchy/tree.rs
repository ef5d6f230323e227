//! In-memory organizational tree with transactional move semantics

use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::info;

use super::node::{NodeId, ScopeNode, TreePath};
use crate::error::{AuthzError, Result};

#[derive(Default)]
struct TreeState {
    nodes: HashMap<NodeId, ScopeNode>,
    next_id: NodeId,
}

/// Organizational hierarchy of scope nodes
///
/// All mutations go through this type so the materialized-path invariant
/// has exactly one owner. Reads take a shared lock; `move_node` holds the
/// write lock across the node and all descendant rewrites, so concurrent
/// moves on overlapping subtrees serialize and no partial path update is
/// ever observable.
pub struct Hierarchy {
    state: RwLock<TreeState>,
}

impl Hierarchy {
    /// Create an empty hierarchy
    pub fn new() -> Self {
        Self {
            state: RwLock::new(TreeState {
                nodes: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a scope node, optionally under an existing parent
    ///
    /// # Errors
    ///
    /// [`AuthzError::ScopeNotFound`] when `parent_id` does not resolve.
    pub fn create(&self, name: impl Into<String>, parent_id: Option<NodeId>) -> Result<ScopeNode> {
        let mut state = self.state.write();

        let parent_path = match parent_id {
            Some(pid) => Some(
                state
                    .nodes
                    .get(&pid)
                    .ok_or(AuthzError::ScopeNotFound(pid))?
                    .path
                    .clone(),
            ),
            None => None,
        };

        let id = state.next_id;
        state.next_id += 1;

        let path = match &parent_path {
            Some(parent) => parent.child(id),
            None => TreePath::root(id),
        };

        let node = ScopeNode {
            id,
            name: name.into(),
            parent_id,
            path,
            is_branch: false,
        };

        info!(node = id, path = %node.path, "scope node created");
        state.nodes.insert(id, node.clone());
        Ok(node)
    }

    /// Look up a node by id
    pub fn get(&self, id: NodeId) -> Option<ScopeNode> {
        self.state.read().nodes.get(&id).cloned()
    }

    /// All direct and transitive children of a node, excluding the node
    /// itself, ordered by path
    ///
    /// # Errors
    ///
    /// [`AuthzError::ScopeNotFound`] when `id` does not resolve.
    pub fn descendants_of(&self, id: NodeId) -> Result<Vec<ScopeNode>> {
        let state = self.state.read();
        let root = state.nodes.get(&id).ok_or(AuthzError::ScopeNotFound(id))?;

        let mut descendants: Vec<ScopeNode> = state
            .nodes
            .values()
            .filter(|node| root.path.is_ancestor_of(&node.path))
            .cloned()
            .collect();
        descendants.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(descendants)
    }

    /// Re-parent a node, rewriting its materialized path and every
    /// descendant's in one transaction
    ///
    /// # Errors
    ///
    /// - [`AuthzError::ScopeNotFound`] when the node or new parent is unknown
    /// - [`AuthzError::CycleRejected`] when the new parent is the node
    ///   itself or one of its descendants; nothing is mutated
    pub fn move_node(&self, id: NodeId, new_parent_id: Option<NodeId>) -> Result<ScopeNode> {
        let mut state = self.state.write();

        let old_path = state
            .nodes
            .get(&id)
            .ok_or(AuthzError::ScopeNotFound(id))?
            .path
            .clone();

        let new_parent_path = match new_parent_id {
            Some(pid) => {
                if pid == id {
                    return Err(AuthzError::CycleRejected {
                        node: id,
                        new_parent: pid,
                    });
                }
                let parent = state.nodes.get(&pid).ok_or(AuthzError::ScopeNotFound(pid))?;
                if old_path.is_ancestor_of(&parent.path) {
                    return Err(AuthzError::CycleRejected {
                        node: id,
                        new_parent: pid,
                    });
                }
                Some(parent.path.clone())
            }
            None => None,
        };

        let new_path = match &new_parent_path {
            Some(parent) => parent.child(id),
            None => TreePath::root(id),
        };

        // all validations passed; rewrite node + descendants under the
        // write lock we already hold
        for node in state.nodes.values_mut() {
            if node.id == id {
                node.parent_id = new_parent_id;
                node.path = new_path.clone();
            } else if old_path.is_ancestor_of(&node.path) {
                node.path = node.path.rebase(&old_path, &new_path);
            }
        }

        info!(node = id, from = %old_path, to = %new_path, "scope node moved");
        Ok(state.nodes[&id].clone())
    }

    /// Delete a childless node
    ///
    /// Fail-closed: a node with descendants is never deleted here; callers
    /// must reparent or delete the children first.
    ///
    /// # Errors
    ///
    /// - [`AuthzError::ScopeNotFound`] when `id` does not resolve
    /// - [`AuthzError::HasChildren`] when descendants exist
    pub fn delete(&self, id: NodeId) -> Result<()> {
        let mut state = self.state.write();
        let path = state
            .nodes
            .get(&id)
            .ok_or(AuthzError::ScopeNotFound(id))?
            .path
            .clone();

        let has_children = state.nodes.values().any(|n| path.is_ancestor_of(&n.path));
        if has_children {
            return Err(AuthzError::HasChildren(id));
        }

        state.nodes.remove(&id);
        info!(node = id, "scope node deleted");
        Ok(())
    }

    /// Set the advisory branch flag on a node
    ///
    /// # Errors
    ///
    /// [`AuthzError::ScopeNotFound`] when `id` does not resolve.
    pub fn set_branch(&self, id: NodeId, is_branch: bool) -> Result<()> {
        let mut state = self.state.write();
        let node = state
            .nodes
            .get_mut(&id)
            .ok_or(AuthzError::ScopeNotFound(id))?;
        node.is_branch = is_branch;
        Ok(())
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.state.read().nodes.len()
    }

    /// Whether the tree has no nodes
    pub fn is_empty(&self) -> bool {
        self.state.read().nodes.is_empty()
    }
}

impl Default for Hierarchy {
    fn default() -> Self {
        Self::new()
    }
}
