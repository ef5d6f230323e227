//! Organizational hierarchy with materialized-path lookup
//!
//! Scope nodes (departments) form a tree. Each node carries a materialized
//! path — the slash-delimited chain of ancestor ids ending in its own id,
//! e.g. `/5/9/` for node 9 under root 5 — so descendant queries are plain
//! string-prefix scans, no recursive traversal.
//!
//! The path invariant is owned entirely by [`Hierarchy`]: callers never
//! hand-construct path strings, and `move` rewrites the node plus every
//! descendant under a single write lock.

mod node;
mod tree;

pub use node::{NodeId, ScopeNode, TreePath};
pub use tree::Hierarchy;
