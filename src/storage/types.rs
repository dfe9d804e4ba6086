//! Types for the local session store

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under which the logged-in user is kept
pub const USER_KEY: &str = "user";

/// The persisted login blob: the login response with at least `user_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredUser {
    /// The logged-in user's id
    pub user_id: i64,

    /// Remaining fields of the login response
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoredUser {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            extra: Map::new(),
        }
    }
}
