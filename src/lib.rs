//! # HRMS Authorization Core
//!
//! Resource-based authorization engine for the HRMS backend. Every inbound
//! operation is identified by a normalized path and an action verb; this
//! crate decides whether an authenticated principal may perform it, driven
//! entirely by data (rules, roles, assignments) rather than static code.
//!
//! ## Components
//!
//! - **Pattern matcher** ([`pattern`]): tokenized path/verb patterns with
//!   `*` (one segment) and trailing `**` (any suffix) wildcards
//! - **Rules, roles, principals** ([`types`]): named rule bundles with
//!   reference-set semantics
//! - **Stores** ([`store`]): async storage traits plus an in-memory backend
//! - **Permission aggregator** ([`snapshot`]): flattens a principal's roles
//!   into an immutable authority snapshot at token issuance
//! - **Organizational hierarchy** ([`hierarchy`]): departments as a
//!   materialized-path tree with transactional moves
//! - **Decision point** ([`engine`]): per-request Allow/Deny, fail-closed
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use hrms_authz::{
//!     AccessRule, DecisionPoint, InMemoryAuthzStore, PermissionAggregator,
//!     Principal, Role, RoleStore, RuleStore,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = InMemoryAuthzStore::new();
//!     let rule = AccessRule::new("r1", "EMPLOYEE_READ", "/api/employees", "GET");
//!     RuleStore::put(&store, rule.clone()).await?;
//!     RoleStore::put(&store, Role::new("role-user", "USER").with_rule(rule)).await?;
//!
//!     let principal = Principal::new("user:alice").with_role("role-user");
//!     let aggregator = PermissionAggregator::new(Arc::new(store.clone()));
//!     let snapshot = aggregator.aggregate(&principal).await?;
//!
//!     let engine = DecisionPoint::new(Arc::new(store.clone()), Arc::new(store));
//!     let decision = engine.decide(Some(&snapshot), "/api/employees", "GET").await?;
//!     assert!(decision.is_allowed());
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod error;
pub mod hierarchy;
pub mod pattern;
pub mod snapshot;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use engine::{AccessDecision, DecisionPoint, EngineConfig, Freshness};
pub use error::{AuthzError, Result};
pub use hierarchy::{Hierarchy, NodeId, ScopeNode, TreePath};
pub use pattern::{PathPattern, VerbPattern};
pub use snapshot::{aggregate_roles, AuthoritySnapshot, PermissionAggregator};
pub use store::{InMemoryAuthzStore, RoleStore, RuleStore};
pub use types::{AccessRule, Principal, PrincipalId, Role, RoleId, RuleId};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
