use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::auth::password::validate_password_bytes;

/// Role given to accounts created without an explicit one.
pub const DEFAULT_ROLE: &str = "employee";

/// An account as stored and returned by the API.
///
/// The credential is kept as a bcrypt hash and never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub name: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a user.
#[derive(Debug, Deserialize, Validate)]
pub struct UserInput {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    /// Plaintext as sent by the client; only its bcrypt hash is stored.
    #[validate(length(min = 1), custom = "validate_password_bytes")]
    pub password: String,
    pub name: Option<String>,
    pub role: Option<String>,
}

/// Payload for `PUT /api/users/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct PasswordUpdate {
    #[validate(length(min = 1), custom = "validate_password_bytes")]
    pub password: String,
}

impl User {
    /// Builds a new user record from validated input and an already computed hash.
    pub fn new(input: UserInput, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: input.username,
            password_hash,
            name: input.name,
            role: input.role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            created_at: Utc::now(),
        }
    }
}
