//! Rule and role storage traits with an in-memory implementation
//!
//! Real deployments back these traits with the persistence collaborator;
//! the in-memory store is the reference implementation and the test
//! backend. Name uniqueness for rules and roles is enforced here, as the
//! store is the component that sees all entities.

use crate::error::{AuthzError, Result};
use crate::types::{AccessRule, Role};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Access rule storage
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// Get a rule by id
    async fn get(&self, id: &str) -> Result<Option<AccessRule>>;

    /// Get a rule by its unique name (authority token)
    async fn get_by_name(&self, name: &str) -> Result<Option<AccessRule>>;

    /// Store a rule; rejects a name already used by a different rule
    async fn put(&self, rule: AccessRule) -> Result<()>;

    /// List all rules
    async fn list(&self) -> Result<Vec<AccessRule>>;

    /// Delete a rule; refused while any role still references it
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Role storage
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Get a role by id
    async fn get(&self, id: &str) -> Result<Option<Role>>;

    /// Get a role by its unique name
    async fn get_by_name(&self, name: &str) -> Result<Option<Role>>;

    /// Store a role; rejects a name already used by a different role
    async fn put(&self, role: Role) -> Result<()>;

    /// List all roles
    async fn list(&self) -> Result<Vec<Role>>;

    /// Delete a role; bundled rule references are dropped, the shared
    /// rules themselves are untouched
    async fn delete(&self, id: &str) -> Result<()>;
}

#[derive(Default)]
struct StoreState {
    rules: HashMap<String, AccessRule>,
    roles: HashMap<String, Role>,
}

/// In-memory rule and role store
///
/// One store holds both entity kinds so rule deletion can check for role
/// references. Clones share the same underlying state.
#[derive(Clone)]
pub struct InMemoryAuthzStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryAuthzStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
        }
    }
}

impl Default for InMemoryAuthzStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RuleStore for InMemoryAuthzStore {
    async fn get(&self, id: &str) -> Result<Option<AccessRule>> {
        let state = self.state.read().await;
        Ok(state.rules.get(id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<AccessRule>> {
        let state = self.state.read().await;
        Ok(state.rules.values().find(|r| r.name == name).cloned())
    }

    async fn put(&self, rule: AccessRule) -> Result<()> {
        let mut state = self.state.write().await;
        let name_taken = state
            .rules
            .values()
            .any(|r| r.name == rule.name && r.id != rule.id);
        if name_taken {
            return Err(AuthzError::DuplicateName(rule.name));
        }
        info!(rule_id = %rule.id, rule_name = %rule.name, "access rule stored");
        state.rules.insert(rule.id.clone(), rule);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<AccessRule>> {
        let state = self.state.read().await;
        Ok(state.rules.values().cloned().collect())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        if let Some(holder) = state.roles.values().find(|role| role.has_rule(id)) {
            return Err(AuthzError::RuleInUse(holder.name.clone()));
        }
        state.rules.remove(id);
        Ok(())
    }
}

#[async_trait]
impl RoleStore for InMemoryAuthzStore {
    async fn get(&self, id: &str) -> Result<Option<Role>> {
        let state = self.state.read().await;
        Ok(state.roles.get(id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Role>> {
        let state = self.state.read().await;
        Ok(state.roles.values().find(|r| r.name == name).cloned())
    }

    async fn put(&self, role: Role) -> Result<()> {
        let mut state = self.state.write().await;
        let name_taken = state
            .roles
            .values()
            .any(|r| r.name == role.name && r.id != role.id);
        if name_taken {
            return Err(AuthzError::DuplicateName(role.name));
        }
        info!(role_id = %role.id, role_name = %role.name, "role stored");
        state.roles.insert(role.id.clone(), role);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Role>> {
        let state = self.state.read().await;
        Ok(state.roles.values().cloned().collect())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        state.roles.remove(id);
        Ok(())
    }
}
