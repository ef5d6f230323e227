//! Error types for the authorization core

use thiserror::Error;

use crate::hierarchy::NodeId;

/// Authorization core errors
///
/// A denied authorization is *not* an error; it is a normal
/// [`AccessDecision`](crate::engine::AccessDecision) outcome. These variants
/// cover structural faults surfaced to administrative callers.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// Referenced organizational scope node does not exist
    #[error("Scope node not found: {0}")]
    ScopeNotFound(NodeId),

    /// Re-parenting would create a cycle in the organizational tree
    #[error("Move of node {node} under {new_parent} would create a cycle")]
    CycleRejected { node: NodeId, new_parent: NodeId },

    /// Deleting a scope node that still has descendants
    #[error("Scope node {0} still has children")]
    HasChildren(NodeId),

    /// Rule or role name already taken by another entity
    #[error("Name already in use: {0}")]
    DuplicateName(String),

    /// Rule is still referenced by at least one role
    #[error("Access rule is still referenced by role '{0}'")]
    RuleInUse(String),

    /// Store lookup failed for a required entity
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for authorization operations
pub type Result<T> = std::result::Result<T, AuthzError>;
