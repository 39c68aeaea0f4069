use async_trait::async_trait;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::{Task, User};

/// Placeholder used when the server starts without `DATABASE_URL`.
/// Every operation fails with [`StoreError::Unconfigured`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredStore;

#[async_trait]
impl Store for UnconfiguredStore {
    async fn find_user_by_username(&self, _username: &str) -> Result<Option<User>, StoreError> {
        Err(StoreError::Unconfigured)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Err(StoreError::Unconfigured)
    }

    async fn count_users(&self) -> Result<i64, StoreError> {
        Err(StoreError::Unconfigured)
    }

    async fn insert_user(&self, _user: User) -> Result<User, StoreError> {
        Err(StoreError::Unconfigured)
    }

    async fn update_user_password(&self, _id: Uuid, _hash: &str) -> Result<(), StoreError> {
        Err(StoreError::Unconfigured)
    }

    async fn delete_user(&self, _id: Uuid) -> Result<(), StoreError> {
        Err(StoreError::Unconfigured)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        Err(StoreError::Unconfigured)
    }

    async fn insert_task(&self, _task: Task) -> Result<Task, StoreError> {
        Err(StoreError::Unconfigured)
    }

    async fn update_task_status(&self, _id: Uuid, _status: &str) -> Result<(), StoreError> {
        Err(StoreError::Unconfigured)
    }

    async fn delete_task(&self, _id: Uuid) -> Result<(), StoreError> {
        Err(StoreError::Unconfigured)
    }
}
