//! Data access for users and tasks.
//!
//! Handlers only ever see the [`Store`] trait. [`PgStore`] is the production backend,
//! [`MemoryStore`] keeps everything in process, and [`UnconfiguredStore`] stands in when
//! no database URL was supplied so that the server can still start.

pub mod memory;
pub mod postgres;
pub mod unconfigured;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Task, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use unconfigured::UnconfiguredStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Another account already uses the requested username.
    #[error("Username exists")]
    DuplicateUsername,
    #[error("DATABASE_URL is not set; no database is configured")]
    Unconfigured,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Single-record operations over the two collections.
///
/// Updates and deletes by id succeed silently when no record matches.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// All users in insertion order.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    async fn count_users(&self) -> Result<i64, StoreError>;

    /// Persists a user. Fails with [`StoreError::DuplicateUsername`] if the username is taken.
    async fn insert_user(&self, user: User) -> Result<User, StoreError>;

    async fn update_user_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError>;

    async fn delete_user(&self, id: Uuid) -> Result<(), StoreError>;

    /// All tasks ordered by [`Task::priority_rank`], newest first within a rank.
    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError>;

    async fn insert_task(&self, task: Task) -> Result<Task, StoreError>;

    async fn update_task_status(&self, id: Uuid, status: &str) -> Result<(), StoreError>;

    async fn delete_task(&self, id: Uuid) -> Result<(), StoreError>;
}
