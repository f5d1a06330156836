//! User records and payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New user creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

/// User update payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Body of `PUT /users/:id/shows`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddShowRequest {
    #[serde(rename = "showId")]
    pub show_id: String,
}

impl User {
    pub fn from_new(new_user: &NewUser) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, changes: UpdateUser) {
        if let Some(username) = changes.username {
            self.username = username;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keeps_missing_fields() {
        let mut user = User::from_new(&NewUser {
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
        });
        user.apply(UpdateUser {
            email: Some("lovelace@example.com".to_string()),
            ..UpdateUser::default()
        });

        assert_eq!(user.username, "ada");
        assert_eq!(user.email, "lovelace@example.com");
    }

    #[test]
    fn test_add_show_request_uses_camel_case_key() {
        let request: AddShowRequest =
            serde_json::from_value(serde_json::json!({ "showId": "abc" })).expect("valid body");
        assert_eq!(request.show_id, "abc");
    }
}
