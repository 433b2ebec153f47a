//! User account record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account that owns habits. Identity only -- there is no credential
/// material anywhere in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub email: String,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a user record stamped with the current time.
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            created_at: Utc::now(),
        }
    }
}
