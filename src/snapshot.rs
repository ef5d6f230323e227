//! Authority snapshots and the permission aggregator
//!
//! A snapshot is the flattened set of authority tokens a principal held at
//! one point in time, typically computed at token issuance and attached to
//! the session. It is immutable afterwards: later role or rule mutations do
//! not reach into already-issued snapshots. Callers that need immediate
//! revocation use the engine's read-through mode instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

use crate::error::Result;
use crate::store::RoleStore;
use crate::types::{Principal, PrincipalId, Role};

/// Flattened, immutable set of authority tokens for one session
///
/// Tokens are role names (coarse-grained) plus every access rule name
/// reachable through those roles. Set semantics: deterministic and
/// order-independent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthoritySnapshot {
    /// Principal the snapshot was computed for
    pub principal_id: PrincipalId,

    /// Granted authority tokens
    tokens: BTreeSet<String>,

    /// Aggregation time
    pub issued_at: DateTime<Utc>,
}

impl AuthoritySnapshot {
    fn new(principal_id: PrincipalId, tokens: BTreeSet<String>) -> Self {
        Self {
            principal_id,
            tokens,
            issued_at: Utc::now(),
        }
    }

    /// Whether the snapshot grants an authority token
    pub fn grants(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// Iterate the granted tokens
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Number of granted tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the snapshot grants nothing
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Flattens a principal's role set into an [`AuthoritySnapshot`]
///
/// Invoked by the authentication collaborator at session/token issuance.
pub struct PermissionAggregator {
    roles: Arc<dyn RoleStore>,
}

impl PermissionAggregator {
    /// Create an aggregator backed by a role store
    pub fn new(roles: Arc<dyn RoleStore>) -> Self {
        Self { roles }
    }

    /// Aggregate a principal's effective authority from the store
    ///
    /// Role ids the store no longer knows grant nothing; a dangling role
    /// reference never widens authority.
    pub async fn aggregate(&self, principal: &Principal) -> Result<AuthoritySnapshot> {
        let mut resolved = Vec::new();
        for role_id in principal.role_ids() {
            match self.roles.get(role_id).await? {
                Some(role) => resolved.push(role),
                None => {
                    debug!(principal = %principal.id, role_id = %role_id, "dangling role reference skipped");
                }
            }
        }

        Ok(aggregate_roles(&principal.id, &resolved))
    }
}

/// Aggregate a snapshot from already-loaded roles
///
/// Pure building block behind [`PermissionAggregator::aggregate`], also
/// usable when the caller has the role set in hand.
pub fn aggregate_roles(principal_id: &str, roles: &[Role]) -> AuthoritySnapshot {
    let mut tokens = BTreeSet::new();
    for role in roles {
        tokens.insert(role.name.clone());
        for rule in role.rules() {
            tokens.insert(rule.name.clone());
        }
    }

    debug!(principal = %principal_id, tokens = tokens.len(), "authority snapshot aggregated");
    AuthoritySnapshot::new(principal_id.to_string(), tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryAuthzStore;
    use crate::types::AccessRule;

    fn user_role() -> Role {
        Role::new("role-user", "USER")
            .with_rule(AccessRule::new("r1", "EMPLOYEE_READ", "/api/employees", "GET"))
            .with_rule(AccessRule::new("r2", "SELF_SERVICE", "/api/me/**", "*"))
    }

    #[test]
    fn test_aggregate_unions_role_and_rule_names() {
        let snapshot = aggregate_roles("user:alice", &[user_role()]);

        assert!(snapshot.grants("USER"));
        assert!(snapshot.grants("EMPLOYEE_READ"));
        assert!(snapshot.grants("SELF_SERVICE"));
        assert!(!snapshot.grants("PAYROLL_WRITE"));
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn test_aggregate_deduplicates_shared_rules() {
        let shared = AccessRule::new("r1", "EMPLOYEE_READ", "/api/employees", "GET");
        let a = Role::new("role-a", "A").with_rule(shared.clone());
        let b = Role::new("role-b", "B").with_rule(shared);

        let snapshot = aggregate_roles("user:alice", &[a, b]);
        assert_eq!(snapshot.len(), 3); // A, B, EMPLOYEE_READ
    }

    #[tokio::test]
    async fn test_aggregate_from_store() {
        let store = InMemoryAuthzStore::new();
        RoleStore::put(&store, user_role()).await.unwrap();

        let principal = Principal::new("user:alice").with_role("role-user");
        let aggregator = PermissionAggregator::new(Arc::new(store));
        let snapshot = aggregator.aggregate(&principal).await.unwrap();

        assert_eq!(snapshot.principal_id, "user:alice");
        assert!(snapshot.grants("USER"));
        assert!(snapshot.grants("EMPLOYEE_READ"));
    }

    #[tokio::test]
    async fn test_dangling_role_grants_nothing() {
        let store = InMemoryAuthzStore::new();
        let principal = Principal::new("user:ghost").with_role("role-deleted");

        let aggregator = PermissionAggregator::new(Arc::new(store));
        let snapshot = aggregator.aggregate(&principal).await.unwrap();
        assert!(snapshot.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_is_stale_after_role_mutation() {
        let store = InMemoryAuthzStore::new();
        RoleStore::put(&store, user_role()).await.unwrap();

        let principal = Principal::new("user:alice").with_role("role-user");
        let aggregator = PermissionAggregator::new(Arc::new(store.clone()));
        let snapshot = aggregator.aggregate(&principal).await.unwrap();

        // revoke EMPLOYEE_READ from the role after issuance
        let mut role = RoleStore::get(&store, "role-user").await.unwrap().unwrap();
        role.remove_rule("r1");
        RoleStore::put(&store, role).await.unwrap();

        // the issued snapshot is unchanged; only re-aggregation sees the revocation
        assert!(snapshot.grants("EMPLOYEE_READ"));
        let fresh = aggregator.aggregate(&principal).await.unwrap();
        assert!(!fresh.grants("EMPLOYEE_READ"));
    }
}
