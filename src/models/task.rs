use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Status given to tasks created without one.
pub const DEFAULT_STATUS: &str = "pending";

/// A task as stored and returned by the API.
///
/// Apart from `status` every descriptive field is optional free text. `assigned_to`
/// holds a username but is not checked against the user table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier (UUID v4), exposed as `_id`.
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: Option<String>,
    /// Free-form tag such as `design`, `video`, `code` or `other`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Free-form priority, usually `high`, `medium` or `low`.
    pub priority: Option<String>,
    pub status: String,
    pub assigned_to: Option<String>,
    /// Due date exactly as the client sent it.
    pub date: Option<String>,
    /// Server-assigned creation time.
    pub created_at: DateTime<Utc>,
}

/// Payload for `POST /api/tasks`.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub priority: Option<String>,
    #[validate(length(min = 1))]
    pub status: Option<String>,
    pub assigned_to: Option<String>,
    pub date: Option<String>,
}

/// Payload for `PUT /api/tasks/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct StatusUpdate {
    #[validate(length(min = 1))]
    pub status: String,
}

impl Task {
    /// Creates a new `Task` from client input, filling in the default status, a fresh
    /// id and the current time.
    pub fn new(input: TaskInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            kind: input.kind,
            priority: input.priority,
            status: input.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            assigned_to: input.assigned_to,
            date: input.date,
            created_at: Utc::now(),
        }
    }

    /// Sort key for task listings: `high`, `medium`, `low`, then any other value,
    /// then tasks without a priority.
    ///
    /// Earlier releases sorted the raw priority string ascending with missing values
    /// first, which listed `high, low, medium`. Listings now follow importance instead.
    pub fn priority_rank(&self) -> u8 {
        match self.priority.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("high") => 0,
            Some("medium") => 1,
            Some("low") => 2,
            Some(_) => 3,
            None => 4,
        }
    }
}
