pub mod password;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::User;
use crate::store::Store;

pub use password::{hash_password, verify_password};

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: User,
}

/// Body of a rejected login (HTTP 401).
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginFailure {
    pub success: bool,
    pub message: String,
}

/// Checks a username/password pair against the store.
///
/// Returns `Ok(None)` when no user has exactly this username or the password does
/// not verify against its stored hash. Nothing is written and no session is created.
pub async fn authenticate(
    store: &dyn Store,
    username: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    let Some(user) = store.find_user_by_username(username).await? else {
        return Ok(None);
    };

    if verify_password(password, &user.password_hash)? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}
