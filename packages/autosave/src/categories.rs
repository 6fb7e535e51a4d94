//! Read-only view of the category taxonomy.
//!
//! Categories live in the headless content store, not the relational
//! datastore; this subsystem only ever lists id/title pairs for the
//! category picker. Assigning one to a draft is just a string id.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::repository::PersistenceResult;

/// One entry of the category taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
}

/// Listing contract against the headless content store.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn list(&self) -> PersistenceResult<Vec<Category>>;
}

/// Fixed listing for tests and local development.
pub struct StaticCategoryStore {
    categories: Vec<Category>,
}

impl StaticCategoryStore {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }
}

#[async_trait]
impl CategoryStore for StaticCategoryStore {
    async fn list(&self) -> PersistenceResult<Vec<Category>> {
        Ok(self.categories.clone())
    }
}
