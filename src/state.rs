use std::sync::Arc;

use crate::store::{MemoryStore, Store};

/// Shared by every worker through `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    /// bcrypt cost used when storing new credentials.
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    /// State backed by an empty [`MemoryStore`].
    pub fn in_memory(bcrypt_cost: u32) -> Self {
        Self::new(Arc::new(MemoryStore::new()), bcrypt_cost)
    }
}
