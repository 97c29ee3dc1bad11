//! Actor identity as a tagged sum type
//!
//! Admins, owners, and staff each carry their own identifier; the
//! variant is resolved once at the API boundary instead of re-branching
//! on a type string at every write site.

use serde::{Deserialize, Serialize};

/// Verified actor identity supplied by the external authorization layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "actor_type", content = "actor_id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Actor {
    Admin(i64),
    Owner(i64),
    Staff(i64),
}

impl Actor {
    pub fn id(&self) -> i64 {
        match self {
            Self::Admin(id) | Self::Owner(id) | Self::Staff(id) => *id,
        }
    }

    /// Stable string tag for persistence (`processed_by_type`, audit rows)
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Admin(_) => "ADMIN",
            Self::Owner(_) => "OWNER",
            Self::Staff(_) => "STAFF",
        }
    }

    /// Rebuild from persisted `(kind, id)` columns
    pub fn from_parts(kind: &str, id: i64) -> Option<Self> {
        match kind {
            "ADMIN" => Some(Self::Admin(id)),
            "OWNER" => Some(Self::Owner(id)),
            "STAFF" => Some(Self::Staff(id)),
            _ => None,
        }
    }
}

/// Authenticated request context supplied by the external authorizer
///
/// The core trusts this without re-validating credentials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub tenant_id: String,
    pub actor: Actor,
}

impl Identity {
    pub fn new(tenant_id: impl Into<String>, actor: Actor) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            actor,
        }
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id())
    }
}
