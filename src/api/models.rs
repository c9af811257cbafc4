//! Data contracts for the backend API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Standard response envelope: `{ status, error?, data? }`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub status: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

/// Payload returned by login and registration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    pub access_token: String,
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub role: String,
}

/// Minimal user record persisted client-side at login, for display only.
/// Authorization decisions never consult it; they always go through the
/// token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub role: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub profile_image: Option<String>,
    pub role: Option<Role>,
    pub role_id: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One page of the admin user listing.
///
/// The backend has answered in several shapes over time: a bare array,
/// `{ users, totalCount }`, and `{ data, total }`. All are tolerated, the
/// way the original console tolerated them.
#[derive(Debug, Clone, Default)]
pub struct UserPage {
    pub users: Vec<User>,
    pub total: u64,
    pub active_count: u64,
}

impl UserPage {
    pub(crate) fn from_value(value: Value) -> Self {
        let active_count = value
            .get("activeCount")
            .and_then(Value::as_u64)
            .unwrap_or(0);

        let (users_value, total) = if value.is_array() {
            (value.clone(), None)
        } else if let Some(users) = value.get("users").filter(|v| v.is_array()) {
            (users.clone(), value.get("totalCount").and_then(Value::as_u64))
        } else if let Some(data) = value.get("data").filter(|v| v.is_array()) {
            (data.clone(), value.get("total").and_then(Value::as_u64))
        } else {
            (Value::Array(Vec::new()), value.get("total").and_then(Value::as_u64))
        };

        let users: Vec<User> = serde_json::from_value(users_value).unwrap_or_default();
        let total = total.unwrap_or(users.len() as u64);

        Self {
            users,
            total,
            active_count,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RoleCount {
    pub count: u64,
}

/// Self-service profile as rendered by the profile page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub profile_image: Option<String>,
    pub bio: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub phone_number: Option<String>,
    pub nationality: Option<String>,
    pub religion: Option<String>,
    pub current_location: Option<String>,
    pub zip: Option<String>,
    pub hometown: Option<String>,
}

/// Partial profile update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub religion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hometown: Option<String>,
}

/// Dashboard overview tiles.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stats {
    pub users: u64,
    pub roles: u64,
    pub active_users: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_page_from_bare_array() {
        let page = UserPage::from_value(json!([
            { "id": "6a4f3f61-9f6e-4a7e-8a8a-2f4f2d6b1c0a", "email": "a@x.io", "isActive": true },
            { "id": "6a4f3f61-9f6e-4a7e-8a8a-2f4f2d6b1c0b", "email": "b@x.io", "isActive": false }
        ]));
        assert_eq!(page.users.len(), 2);
        assert_eq!(page.total, 2);
        assert_eq!(page.users[0].email, "a@x.io");
        assert!(page.users[0].is_active);
    }

    #[test]
    fn user_page_from_users_total_count() {
        let page = UserPage::from_value(json!({
            "users": [{ "email": "a@x.io" }],
            "totalCount": 42,
            "activeCount": 7
        }));
        assert_eq!(page.users.len(), 1);
        assert_eq!(page.total, 42);
        assert_eq!(page.active_count, 7);
    }

    #[test]
    fn user_page_from_data_total() {
        let page = UserPage::from_value(json!({
            "data": [{ "email": "a@x.io" }, { "email": "b@x.io" }],
            "total": 23
        }));
        assert_eq!(page.users.len(), 2);
        assert_eq!(page.total, 23);
    }

    #[test]
    fn user_page_from_unknown_shape_is_empty() {
        let page = UserPage::from_value(json!({ "whatever": 1 }));
        assert!(page.users.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn envelope_with_failure() {
        let envelope: Envelope<Role> =
            serde_json::from_value(json!({ "status": false, "error": "nope" })).unwrap();
        assert!(!envelope.status);
        assert_eq!(envelope.error.as_deref(), Some("nope"));
        assert!(envelope.data.is_none());
    }
}
