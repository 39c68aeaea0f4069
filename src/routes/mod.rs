pub mod auth;
pub mod health;
pub mod setup;
pub mod tasks;
pub mod users;

use actix_cors::Cors;
use actix_web::{http::header, web};
use uuid::Uuid;

use crate::error::AppError;

/// Registers every `/api` endpoint. Mount it inside `web::scope("/api")`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(auth::login)
        .service(setup::setup)
        .service(
            web::scope("/tasks")
                .service(tasks::get_tasks)
                .service(tasks::create_task)
                .service(tasks::update_task_status)
                .service(tasks::delete_task),
        )
        .service(
            web::scope("/users")
                .service(users::get_users)
                .service(users::create_user)
                .service(users::update_user_password)
                .service(users::delete_user),
        );
}

/// Open CORS policy: any origin, the four verbs plus preflight, and the two headers
/// browser clients send.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(3600)
}

/// Malformed or incomplete JSON bodies answer `400 {"error": ...}`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

pub(crate) fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid id: {}", raw)))
}
