use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::{Task, User};

const USER_COLUMNS: &str = "id, username, password_hash, name, role, created_at";
const TASK_COLUMNS: &str = "id, title, kind, priority, status, assigned_to, date, created_at";

/// How long a request waits for a pooled connection before failing.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);

/// Postgres-backed store. Schema lives in `migrations/`.
///
/// Migrations run on the first operation that reaches the database and are retried on
/// later operations until one succeeds, so the database may come up after the server.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    schema: Arc<OnceCell<()>>,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            schema: Arc::new(OnceCell::new()),
        }
    }

    /// Builds a pool without opening a connection, so an unreachable database does not
    /// stop the server from binding. Only a malformed URL is reported here.
    pub fn connect_lazy(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_lazy(database_url)?;
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Applies migrations once per process. A failed attempt leaves the cell empty.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.schema.get_or_try_init(|| self.migrate()).await?;
        Ok(())
    }

    pub fn schema_ready(&self) -> bool {
        self.schema.initialized()
    }

    async fn pool(&self) -> Result<&PgPool, StoreError> {
        self.ensure_schema().await?;
        Ok(&self.pool)
    }
}

fn map_unique_violation(error: sqlx::Error) -> StoreError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateUsername,
        _ => StoreError::Database(error),
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(self.pool().await?)
        .await?;
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC"
        ))
        .fetch_all(self.pool().await?)
        .await?;
        Ok(users)
    }

    async fn count_users(&self) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool().await?)
            .await?;
        Ok(count)
    }

    async fn insert_user(&self, user: User) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, username, password_hash, name, role, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(&user.role)
        .bind(user.created_at)
        .fetch_one(self.pool().await?)
        .await
        .map_err(map_unique_violation)
    }

    async fn update_user_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError> {
        sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(self.pool().await?)
            .await?;
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool().await?)
            .await?;
        Ok(())
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        // Must agree with Task::priority_rank.
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             ORDER BY CASE
                 WHEN priority IS NULL THEN 4
                 WHEN lower(priority) = 'high' THEN 0
                 WHEN lower(priority) = 'medium' THEN 1
                 WHEN lower(priority) = 'low' THEN 2
                 ELSE 3
             END ASC, created_at DESC"
        ))
        .fetch_all(self.pool().await?)
        .await?;
        Ok(tasks)
    }

    async fn insert_task(&self, task: Task) -> Result<Task, StoreError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (id, title, kind, priority, status, assigned_to, date, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.kind)
        .bind(&task.priority)
        .bind(&task.status)
        .bind(&task.assigned_to)
        .bind(&task.date)
        .bind(task.created_at)
        .fetch_one(self.pool().await?)
        .await?;
        Ok(task)
    }

    async fn update_task_status(&self, id: Uuid, status: &str) -> Result<(), StoreError> {
        sqlx::query("UPDATE tasks SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(self.pool().await?)
            .await?;
        Ok(())
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(self.pool().await?)
            .await?;
        Ok(())
    }
}
