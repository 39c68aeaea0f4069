use crate::{
    error::AppError,
    models::{StatusUpdate, Task, TaskInput},
    routes::parse_id,
    state::AppState,
    store::Store,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// Lists every task.
///
/// Tasks are grouped by priority (`high`, `medium`, `low`, other values, then none)
/// and newest first within each group.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects.
/// - `500 Internal Server Error`: `{"error": ...}` with the store's message.
#[get("")]
pub async fn get_tasks(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let tasks = state.store.list_tasks().await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task.
///
/// All descriptive fields are optional free text. `status` defaults to `pending` and
/// the creation time is assigned by the server.
///
/// ## Request Body:
/// `{"title", "type", "priority", "status", "assignedTo", "date"}`, all optional.
///
/// ## Responses:
/// - `200 OK`: the stored `Task`, including its generated `_id`.
/// - `422 Unprocessable Entity`: `status` was sent as an empty string.
/// - `500 Internal Server Error`: the store rejected the write.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = state
        .store
        .insert_task(Task::new(task_data.into_inner()))
        .await?;
    log::info!("created task {}", task.id);

    Ok(HttpResponse::Ok().json(task))
}

/// Overwrites the status of a task.
///
/// Only `status` changes. An unknown id is not an error; nothing is updated.
///
/// ## Path Parameters:
/// - `id`: the task UUID.
///
/// ## Request Body:
/// `{"status": "<any non-empty string>"}`
///
/// ## Responses:
/// - `200 OK`: `{"success": true}`.
/// - `400 Bad Request`: `id` is not a UUID.
/// - `500 Internal Server Error`: the store rejected the update.
#[put("/{id}")]
pub async fn update_task_status(
    state: web::Data<AppState>,
    task_id: web::Path<String>,
    update: web::Json<StatusUpdate>,
) -> Result<impl Responder, AppError> {
    update.validate()?;
    let id = parse_id(&task_id)?;

    state.store.update_task_status(id, &update.status).await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// Deletes a task by its ID. Deleting an unknown id succeeds.
///
/// ## Responses:
/// - `200 OK`: `{"success": true}`.
/// - `400 Bad Request`: `id` is not a UUID.
/// - `500 Internal Server Error`: the store rejected the delete.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = parse_id(&task_id)?;

    state.store.delete_task(id).await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
