//! Access decision types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of one authorization decision
///
/// Allow and Deny are the only terminal states. A Deny is normal control
/// flow for the request dispatcher, never an error, and is not logged as a
/// failure by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    /// Unique decision id
    pub id: String,

    /// Whether the request is allowed
    pub allowed: bool,

    /// Authority token that granted access, when allowed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granted_by: Option<String>,

    /// Reason for the decision
    pub reason: String,

    /// Decision timestamp
    pub timestamp: DateTime<Utc>,
}

impl AccessDecision {
    /// Create an allow decision granted by an authority token
    pub fn allow(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            allowed: true,
            granted_by: Some(token.into()),
            reason: reason.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a deny decision
    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            allowed: false,
            granted_by: None,
            reason: reason.into(),
            timestamp: Utc::now(),
        }
    }

    /// Whether access was granted
    pub fn is_allowed(&self) -> bool {
        self.allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_decision() {
        let decision = AccessDecision::allow("USER", "role 'USER' authorizes this request");
        assert!(decision.is_allowed());
        assert_eq!(decision.granted_by.as_deref(), Some("USER"));
        assert!(!decision.id.is_empty());
    }

    #[test]
    fn test_deny_decision() {
        let decision = AccessDecision::deny("no authority matches");
        assert!(!decision.is_allowed());
        assert!(decision.granted_by.is_none());
    }
}
