use crate::{
    auth::{authenticate, LoginFailure, LoginRequest, LoginResponse},
    error::AppError,
    state::AppState,
};
use actix_web::{post, web, HttpResponse};

/// Login user
///
/// Verifies the username/password pair and returns the stored user on success.
/// No token or session is issued; every call is checked independently.
///
/// ## Responses:
/// - `200 OK`: `{"success": true, "user": User}`.
/// - `401 Unauthorized`: `{"success": false, "message": "Invalid credentials"}`.
/// - `500 Internal Server Error`: the store could not be queried.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    credentials: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let user = authenticate(
        state.store.as_ref(),
        &credentials.username,
        &credentials.password,
    )
    .await?;

    match user {
        Some(user) => {
            log::info!("user {} logged in", user.username);
            Ok(HttpResponse::Ok().json(LoginResponse {
                success: true,
                user,
            }))
        }
        None => {
            log::warn!("rejected login for {:?}", credentials.username);
            Ok(HttpResponse::Unauthorized().json(LoginFailure {
                success: false,
                message: "Invalid credentials".into(),
            }))
        }
    }
}
