//! User account models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::Role;

/// A user account scoped to one organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user (no credentials)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Role,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
        }
    }
}

/// Input for creating a user inside the caller's organization
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Role,
}

/// Input for updating a user; absent fields are left unchanged
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserInput {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_input_accepts_member_role() {
        let input: CreateUserInput = serde_json::from_str(
            r#"{"email": "ana@acme.test", "password": "long-enough", "role": "user"}"#,
        )
        .unwrap();
        assert_eq!(input.role, Role::User);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_user_input_defaults_to_member_role() {
        let input: CreateUserInput =
            serde_json::from_str(r#"{"email": "ana@acme.test", "password": "long-enough"}"#)
                .unwrap();
        assert_eq!(input.role, Role::User);
    }

    #[test]
    fn test_short_password_is_rejected() {
        let input: CreateUserInput =
            serde_json::from_str(r#"{"email": "ana@acme.test", "password": "short"}"#).unwrap();
        assert!(input.validate().is_err());
    }
}
