//! Core authorization types: access rules, roles, principals

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::pattern::{PathPattern, VerbPattern};

/// Unique access rule identifier
pub type RuleId = String;

/// Unique role identifier
pub type RoleId = String;

/// Unique principal identifier
pub type PrincipalId = String;

/// A named (path-pattern, verb-pattern) authorization unit
///
/// The rule `name` doubles as the authority token that appears in
/// [`AuthoritySnapshot`](crate::snapshot::AuthoritySnapshot)s. Identity is
/// the `id`; pattern fields are mutable by administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRule {
    /// Rule identifier
    pub id: RuleId,

    /// Unique authority token (e.g., "EMPLOYEE_READ")
    pub name: String,

    /// Path pattern (e.g., "/api/employees/**")
    pub path: PathPattern,

    /// Verb pattern (e.g., "GET" or "*")
    pub verb: VerbPattern,

    /// Human-readable description
    #[serde(default)]
    pub description: String,
}

impl AccessRule {
    /// Create a new access rule, parsing its patterns
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        path: &str,
        verb: &str,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: PathPattern::parse(path),
            verb: VerbPattern::parse(verb),
            description: String::new(),
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check a concrete (path, verb) pair against this rule
    pub fn matches(&self, path: &str, verb: &str) -> bool {
        self.verb.matches(verb) && self.path.matches(path)
    }
}

/// A named bundle of access rules
///
/// Roles hold a *reference set* of rules keyed by rule id: adding a rule
/// twice is a no-op, removing an absent rule is a no-op, and deleting a role
/// elsewhere never deletes the shared rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role identifier
    pub id: RoleId,

    /// Unique role name (e.g., "USER", "HR_ADMIN"); also an authority token
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Rules bundled into this role, keyed by rule id
    #[serde(default)]
    rules: BTreeMap<RuleId, AccessRule>,
}

impl Role {
    /// Create a new empty role
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            rules: BTreeMap::new(),
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a rule to the bundle; adding a rule already present (by id) is a
    /// no-op
    pub fn add_rule(&mut self, rule: AccessRule) {
        self.rules.entry(rule.id.clone()).or_insert(rule);
    }

    /// Builder form of [`add_rule`](Self::add_rule)
    pub fn with_rule(mut self, rule: AccessRule) -> Self {
        self.add_rule(rule);
        self
    }

    /// Remove a rule by id; removing an absent rule is a no-op
    pub fn remove_rule(&mut self, rule_id: &str) {
        self.rules.remove(rule_id);
    }

    /// Whether the bundle contains a rule with this id
    pub fn has_rule(&self, rule_id: &str) -> bool {
        self.rules.contains_key(rule_id)
    }

    /// Number of rules in the bundle
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Iterate the bundled rules (order unspecified for callers)
    pub fn rules(&self) -> impl Iterator<Item = &AccessRule> {
        self.rules.values()
    }

    /// Whether any rule in this bundle authorizes the (path, verb) pair
    ///
    /// Short-circuits on the first match; evaluation order across rules is
    /// unspecified and must not be relied upon.
    pub fn authorizes(&self, path: &str, verb: &str) -> bool {
        self.rules.values().any(|rule| rule.matches(path, verb))
    }
}

/// An authenticated actor holding a set of role references
///
/// Roles are shared between principals; a principal only stores role ids.
/// Effective authority is the union of the referenced roles' rule sets,
/// flattened by the [`PermissionAggregator`](crate::snapshot::PermissionAggregator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Principal identifier (e.g., "user:42")
    pub id: PrincipalId,

    /// Referenced roles, by role id
    #[serde(default)]
    roles: BTreeSet<RoleId>,
}

impl Principal {
    /// Create a new principal with no roles
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            roles: BTreeSet::new(),
        }
    }

    /// Assign a role; assigning an already-held role is a no-op
    pub fn assign_role(&mut self, role_id: impl Into<String>) {
        self.roles.insert(role_id.into());
    }

    /// Builder form of [`assign_role`](Self::assign_role)
    pub fn with_role(mut self, role_id: impl Into<String>) -> Self {
        self.assign_role(role_id);
        self
    }

    /// Revoke a role; revoking an absent role is a no-op
    pub fn revoke_role(&mut self, role_id: &str) {
        self.roles.remove(role_id);
    }

    /// The referenced role ids
    pub fn role_ids(&self) -> impl Iterator<Item = &RoleId> {
        self.roles.iter()
    }

    /// Whether the principal holds no roles
    pub fn has_no_roles(&self) -> bool {
        self.roles.is_empty()
    }
}
