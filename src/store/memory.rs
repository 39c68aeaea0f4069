use std::cmp::Reverse;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::{Task, User};

/// In-process store used by the test suite and by `DATABASE_URL=memory://`.
/// Contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    tasks: RwLock<Vec<Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.clone())
    }

    async fn count_users(&self) -> Result<i64, StoreError> {
        Ok(self.users.read().await.len() as i64)
    }

    async fn insert_user(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::DuplicateUsername);
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn update_user_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.password_hash = password_hash.to_string();
        }
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), StoreError> {
        self.users.write().await.retain(|u| u.id != id);
        Ok(())
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let mut tasks = self.tasks.read().await.clone();
        // Stable sort keeps insertion order for identical timestamps.
        tasks.sort_by_key(|t| (t.priority_rank(), Reverse(t.created_at)));
        Ok(tasks)
    }

    async fn insert_task(&self, task: Task) -> Result<Task, StoreError> {
        self.tasks.write().await.push(task.clone());
        Ok(task)
    }

    async fn update_task_status(&self, id: Uuid, status: &str) -> Result<(), StoreError> {
        let mut tasks = self.tasks.write().await;
        if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
            task.status = status.to_string();
        }
        Ok(())
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), StoreError> {
        self.tasks.write().await.retain(|t| t.id != id);
        Ok(())
    }
}
