/// User domain type
use crate::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account that owns tracked playlists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Display name / login name
    pub name: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a generated id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UserId::generate(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a user with a specific ID (for database loading)
    pub fn with_id(id: UserId, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            created_at,
        }
    }
}
