//! Item Store
//!
//! External collaborator boundary for listings. The trait carries only what
//! the protected operations need; `InMemoryItemStore` stands in for the real
//! service in the server and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::item::entity::{Item, NewItem};
use crate::shared::error::Result;

#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Item>>;

    /// Persist a new listing, assigning id and creation timestamp.
    async fn save(&self, new_item: NewItem) -> Result<Item>;

    async fn update(&self, item: Item) -> Result<()>;

    /// Returns whether a listing was deleted.
    async fn delete(&self, id: &str) -> Result<bool>;
}

#[derive(Default)]
pub struct InMemoryItemStore {
    items: RwLock<HashMap<String, Item>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Item>> {
        Ok(self.items.read().get(id).cloned())
    }

    async fn save(&self, new_item: NewItem) -> Result<Item> {
        let item = Item {
            id: uuid::Uuid::new_v4().to_string(),
            title: new_item.title,
            description: new_item.description,
            price_cents: new_item.price_cents,
            owner_id: new_item.owner_id,
            created_at: Utc::now(),
        };
        self.items.write().insert(item.id.clone(), item.clone());
        Ok(item)
    }

    async fn update(&self, item: Item) -> Result<()> {
        self.items.write().insert(item.id.clone(), item);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.items.write().remove(id).is_some())
    }
}
