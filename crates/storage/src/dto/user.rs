use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::{non_empty, required};
use crate::document::Stored;
use crate::error::Result;
use crate::models::{Role, User};

const PARAMETERS_MISSING: &str = "Parameters missing";

/// Request payload for signing up, or for an admin creating a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Parameters missing"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Parameters missing"))]
    pub last_name: String,

    #[serde(default)]
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Defaults to `reader`.
    pub role: Option<Role>,

    #[validate(url)]
    pub user_photo_url: Option<String>,

    pub location: Option<String>,
    pub organization: Option<String>,
    pub position: Option<String>,
}

impl SignUpRequest {
    /// Builds the stored user around an already hashed password.
    pub fn into_user(self, password_hash: String) -> Result<User> {
        Ok(User {
            first_name: required(&self.first_name, PARAMETERS_MISSING)?,
            last_name: required(&self.last_name, PARAMETERS_MISSING)?,
            email: normalize_email(&self.email)?,
            password: password_hash,
            role: self.role.unwrap_or_default(),
            user_photo_url: non_empty(self.user_photo_url),
            location: non_empty(self.location),
            organization: non_empty(self.organization),
            position: non_empty(self.position),
        })
    }
}

/// Emails are compared trimmed and lower-cased.
pub fn normalize_email(email: &str) -> Result<String> {
    Ok(required(email, PARAMETERS_MISSING)?.to_lowercase())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Parameters missing"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Parameters missing"))]
    pub password: String,
}

/// Request payload for replacing a user's profile.
///
/// The stored password is kept unless a new one is given.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "User must have first name and last name"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "User must have first name and last name"))]
    pub last_name: String,

    #[serde(default)]
    #[validate(email(message = "User must have an email"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,

    /// Only admins may change roles.
    pub role: Option<Role>,

    #[validate(url)]
    pub user_photo_url: Option<String>,

    pub location: Option<String>,
    pub organization: Option<String>,
    pub position: Option<String>,
}

impl UpdateUserRequest {
    pub fn apply(self, existing: &User, password_hash: Option<String>, role: Role) -> Result<User> {
        Ok(User {
            first_name: required(&self.first_name, "User must have first name and last name")?,
            last_name: required(&self.last_name, "User must have first name and last name")?,
            email: required(&self.email, "User must have an email")?.to_lowercase(),
            password: password_hash.unwrap_or_else(|| existing.password.clone()),
            role,
            user_photo_url: non_empty(self.user_photo_url),
            location: non_empty(self.location),
            organization: non_empty(self.organization),
            position: non_empty(self.position),
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ByRoleQuery {
    pub role: Option<Role>,
}

/// A user as shown to clients. The password hash is never included and
/// the email only for the user's own account or to admins.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn public(stored: Stored<User>) -> Self {
        Self::new(stored, false)
    }

    pub fn with_email(stored: Stored<User>) -> Self {
        Self::new(stored, true)
    }

    fn new(stored: Stored<User>, include_email: bool) -> Self {
        let user = stored.doc;
        Self {
            id: stored.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: include_email.then_some(user.email),
            role: user.role,
            user_photo_url: user.user_photo_url,
            location: user.location,
            organization: user.organization,
            position: user.position,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserList {
    pub users: Vec<UserResponse>,
    pub users_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_user() -> Stored<User> {
        Stored {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            doc: User {
                first_name: "Ana".into(),
                last_name: "Lopez".into(),
                email: "ana@example.com".into(),
                password: "$argon2id$v=19$...".into(),
                role: Role::Author,
                user_photo_url: None,
                location: Some("Madrid".into()),
                organization: None,
                position: None,
            },
        }
    }

    #[test]
    fn responses_never_carry_the_password() {
        let value = serde_json::to_value(UserResponse::with_email(stored_user())).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["email"], "ana@example.com");
        assert_eq!(value["role"], "author");
    }

    #[test]
    fn public_responses_hide_the_email() {
        let value = serde_json::to_value(UserResponse::public(stored_user())).unwrap();
        assert!(value.get("email").is_none());
    }

    #[test]
    fn emails_are_normalized() {
        assert_eq!(normalize_email("  Ana@Example.COM ").unwrap(), "ana@example.com");
        assert!(normalize_email(" ").is_err());
    }
}
