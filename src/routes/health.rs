use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

pub const BANNER: &str = "Task Manager backend is running!";

/// Plaintext banner at the site root.
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(BANNER)
}

/// Health check endpoint
///
/// Returns the current status of the API and timestamp. Does not touch the store.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now()
    }))
}
