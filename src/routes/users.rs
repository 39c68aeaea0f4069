use crate::{
    auth::hash_password,
    error::AppError,
    models::{PasswordUpdate, User, UserInput},
    routes::parse_id,
    state::AppState,
    store::{Store, StoreError},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// Lists every user in insertion order. Credentials are never included.
#[get("")]
pub async fn get_users(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let users = state.store.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

/// Creates a user (employee) account.
///
/// The username must not already exist. The check runs before hashing and is backed
/// by the store's uniqueness constraint, so a concurrent duplicate still fails the
/// same way. `role` defaults to `employee`.
///
/// ## Request Body:
/// `{"username", "password", "name"?, "role"?}`
///
/// ## Responses:
/// - `200 OK`: `{"success": true, "user": User}`.
/// - `400 Bad Request`: `{"error": "Username exists"}`, or a malformed body.
/// - `422 Unprocessable Entity`: empty username or password.
/// - `500 Internal Server Error`: the store rejected the write.
#[post("")]
pub async fn create_user(
    state: web::Data<AppState>,
    user_data: web::Json<UserInput>,
) -> Result<impl Responder, AppError> {
    user_data.validate()?;

    if state
        .store
        .find_user_by_username(&user_data.username)
        .await?
        .is_some()
    {
        return Err(StoreError::DuplicateUsername.into());
    }

    let password_hash = hash_password(&user_data.password, state.bcrypt_cost)?;
    let user = state
        .store
        .insert_user(User::new(user_data.into_inner(), password_hash))
        .await?;
    log::info!("created user {} with role {}", user.username, user.role);

    Ok(HttpResponse::Ok().json(json!({ "success": true, "user": user })))
}

/// Replaces a user's password. Only the stored credential changes; an unknown id
/// is a no-op.
///
/// ## Responses:
/// - `200 OK`: `{"success": true}`.
/// - `400 Bad Request`: `id` is not a UUID.
/// - `422 Unprocessable Entity`: empty password.
/// - `500 Internal Server Error`: the store rejected the update.
#[put("/{id}")]
pub async fn update_user_password(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    update: web::Json<PasswordUpdate>,
) -> Result<impl Responder, AppError> {
    update.validate()?;
    let id = parse_id(&user_id)?;

    let password_hash = hash_password(&update.password, state.bcrypt_cost)?;
    state.store.update_user_password(id, &password_hash).await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// Deletes a user by its ID. Deleting an unknown id succeeds.
#[delete("/{id}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = parse_id(&user_id)?;

    state.store.delete_user(id).await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    // bcrypt keeps its MIN_COST (4) private; mirror it for tests.
    const MIN_COST: u32 = 4;

    #[actix_rt::test]
    async fn test_create_user_defaults_role_and_hashes_password() {
        let state = AppState::in_memory(MIN_COST);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .service(web::scope("/users").service(create_user)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "username": "mona", "password": "pw", "name": "Mona" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["role"], "employee");

        let stored = state.store.find_user_by_username("mona").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "pw");
        assert!(bcrypt::verify("pw", &stored.password_hash).unwrap());
    }

    #[actix_rt::test]
    async fn test_create_user_requires_password() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::in_memory(MIN_COST)))
                .app_data(crate::routes::json_config())
                .service(web::scope("/users").service(create_user)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "username": "mona" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("password"));
    }

    #[actix_rt::test]
    async fn test_update_password_changes_credential() {
        let state = AppState::in_memory(MIN_COST);
        let hash = hash_password("old", MIN_COST).unwrap();
        let user = User::new(
            UserInput {
                username: "mona".into(),
                password: "old".into(),
                name: None,
                role: None,
            },
            hash,
        );
        let user = state.store.insert_user(user).await.unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .service(web::scope("/users").service(update_user_password)),
        )
        .await;

        let req = test::TestRequest::put()
            .uri(&format!("/users/{}", user.id))
            .set_json(json!({ "password": "new" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let stored = state.store.find_user_by_username("mona").await.unwrap().unwrap();
        assert!(bcrypt::verify("new", &stored.password_hash).unwrap());
        assert_eq!(stored.id, user.id);
    }
}
