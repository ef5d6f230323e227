//! Authorization decision point
//!
//! Per-request entry point turning `(authority, path, verb)` into an
//! [`AccessDecision`]. Evaluation is stateless per call and read-only over
//! the stores, so unbounded concurrent callers need no synchronization
//! here.
//!
//! Two freshness modes cover the staleness tradeoff:
//!
//! - [`Freshness::CachedSnapshot`]: decide against the immutable
//!   [`AuthoritySnapshot`] issued at authentication time. Cheap, but role
//!   mutations after issuance are invisible until re-aggregation.
//! - [`Freshness::ReadThrough`]: re-read the principal's roles from the
//!   store on every call. Fresh, slower.

pub mod decision;

pub use decision::AccessDecision;

use std::sync::Arc;
use tracing::debug;

use crate::error::Result;
use crate::snapshot::AuthoritySnapshot;
use crate::store::{RoleStore, RuleStore};
use crate::types::Principal;

/// Snapshot freshness strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Freshness {
    /// Trust the issued snapshot for the life of the session (default)
    #[default]
    CachedSnapshot,
    /// Re-aggregate from the role store on every decision
    ReadThrough,
}

/// Decision point configuration
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Snapshot freshness strategy
    pub freshness: Freshness,
}

/// The per-request authorization decision point
///
/// Fail-closed: an unauthenticated caller, an empty authority set, or a
/// token no store can resolve all end in Deny. There is no default-allow
/// path.
pub struct DecisionPoint {
    rules: Arc<dyn RuleStore>,
    roles: Arc<dyn RoleStore>,
    config: EngineConfig,
}

impl DecisionPoint {
    /// Create a decision point with the default configuration
    pub fn new(rules: Arc<dyn RuleStore>, roles: Arc<dyn RoleStore>) -> Self {
        Self::with_config(rules, roles, EngineConfig::default())
    }

    /// Create a decision point with an explicit configuration
    pub fn with_config(
        rules: Arc<dyn RuleStore>,
        roles: Arc<dyn RoleStore>,
        config: EngineConfig,
    ) -> Self {
        Self {
            rules,
            roles,
            config,
        }
    }

    /// Decide a request for an authenticated session, honoring the
    /// configured freshness mode
    ///
    /// `snapshot` is the authority embedded in the session at issuance;
    /// `principal` is the live identity used in read-through mode.
    /// Pass `None` for unauthenticated callers, which always denies.
    pub async fn authorize(
        &self,
        principal: Option<&Principal>,
        snapshot: Option<&AuthoritySnapshot>,
        path: &str,
        verb: &str,
    ) -> Result<AccessDecision> {
        match self.config.freshness {
            Freshness::CachedSnapshot => self.decide(snapshot, path, verb).await,
            Freshness::ReadThrough => match principal {
                Some(p) => self.decide_for_principal(p, path, verb).await,
                None => Ok(AccessDecision::deny("unauthenticated")),
            },
        }
    }

    /// Decide a request against an issued authority snapshot
    ///
    /// Allows iff any authority token in the snapshot resolves to a role or
    /// rule whose pattern authorizes `(path, verb)`. Tokens neither store
    /// knows grant nothing.
    pub async fn decide(
        &self,
        snapshot: Option<&AuthoritySnapshot>,
        path: &str,
        verb: &str,
    ) -> Result<AccessDecision> {
        let Some(snapshot) = snapshot else {
            return Ok(AccessDecision::deny("unauthenticated"));
        };

        debug!(principal = %snapshot.principal_id, path, verb, "evaluating snapshot decision");

        for token in snapshot.tokens() {
            if let Some(role) = self.roles.get_by_name(token).await? {
                if role.authorizes(path, verb) {
                    debug!(token, "role token authorizes request");
                    return Ok(AccessDecision::allow(
                        token,
                        format!("role '{}' authorizes {} {}", token, verb, path),
                    ));
                }
                continue;
            }

            if let Some(rule) = self.rules.get_by_name(token).await? {
                if rule.matches(path, verb) {
                    debug!(token, "rule token authorizes request");
                    return Ok(AccessDecision::allow(
                        token,
                        format!("rule '{}' authorizes {} {}", token, verb, path),
                    ));
                }
            }
        }

        Ok(AccessDecision::deny(format!(
            "no granted authority matches {} {}",
            verb, path
        )))
    }

    /// Decide a request against the principal's live role set
    ///
    /// Read-through semantics: every call re-reads the referenced roles
    /// from the store, so revocations take effect immediately.
    pub async fn decide_for_principal(
        &self,
        principal: &Principal,
        path: &str,
        verb: &str,
    ) -> Result<AccessDecision> {
        debug!(principal = %principal.id, path, verb, "evaluating read-through decision");

        for role_id in principal.role_ids() {
            let Some(role) = self.roles.get(role_id).await? else {
                continue;
            };
            if role.authorizes(path, verb) {
                return Ok(AccessDecision::allow(
                    role.name.clone(),
                    format!("role '{}' authorizes {} {}", role.name, verb, path),
                ));
            }
        }

        Ok(AccessDecision::deny(format!(
            "no granted authority matches {} {}",
            verb, path
        )))
    }
}
