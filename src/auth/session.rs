//! Session management for authentication

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::storage::StoredUser;

/// An authenticated session.
///
/// Created by a successful login (or resumed from the session store) and
/// destroyed by logout or account deletion. The backend issues no token, so
/// the session carries no expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// The logged-in user's id
    pub user_id: i64,

    /// The login response as the server sent it
    pub payload: Value,

    /// When this session was created or resumed
    pub started_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from the body of a `POST /login/` response.
    ///
    /// The user id is read from `user_id`, `id` or `user.id`, in that order.
    pub fn from_login_payload(payload: Value) -> Result<Self> {
        let user_id = extract_user_id(&payload)
            .ok_or_else(|| Error::auth("login response did not include a user id"))?;

        Ok(Self {
            user_id,
            payload,
            started_at: Utc::now(),
        })
    }

    /// Resume a session from the stored login blob
    pub fn from_stored(stored: StoredUser) -> Self {
        let user_id = stored.user_id;
        let mut payload = stored.extra;
        payload.insert("user_id".to_string(), Value::from(user_id));

        Self {
            user_id,
            payload: Value::Object(payload),
            started_at: Utc::now(),
        }
    }

    /// The blob persisted under the `user` key
    pub fn to_stored(&self) -> StoredUser {
        let mut extra = match &self.payload {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        };
        extra.remove("user_id");

        StoredUser {
            user_id: self.user_id,
            extra,
        }
    }
}

fn extract_user_id(payload: &Value) -> Option<i64> {
    ["user_id", "id"]
        .iter()
        .find_map(|key| payload.get(*key).and_then(as_id))
        .or_else(|| payload.get("user").and_then(|u| u.get("id")).and_then(as_id))
}

fn as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_id_from_top_level() {
        let session = Session::from_login_payload(json!({"user_id": 12, "name": "Sarah"})).unwrap();
        assert_eq!(session.user_id, 12);

        let session = Session::from_login_payload(json!({"id": "5", "email": "a@b.co"})).unwrap();
        assert_eq!(session.user_id, 5);
    }

    #[test]
    fn user_id_from_nested_user() {
        let session =
            Session::from_login_payload(json!({"message": "ok", "user": {"id": 3}})).unwrap();
        assert_eq!(session.user_id, 3);
    }

    #[test]
    fn missing_user_id_is_an_auth_error() {
        let err = Session::from_login_payload(json!({"message": "ok"})).unwrap_err();
        assert!(matches!(err, Error::Auth(_)));
    }

    #[test]
    fn stored_blob_keeps_payload() {
        let session = Session::from_login_payload(json!({"id": 4, "name": "Ana"})).unwrap();
        let stored = session.to_stored();
        assert_eq!(stored.user_id, 4);
        assert_eq!(stored.extra.get("name"), Some(&json!("Ana")));

        let blob = serde_json::to_value(&stored).unwrap();
        assert_eq!(blob["user_id"], json!(4));

        let resumed = Session::from_stored(stored);
        assert_eq!(resumed.user_id, 4);
        assert_eq!(resumed.payload["name"], json!("Ana"));
    }
}
