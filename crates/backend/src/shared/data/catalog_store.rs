use async_trait::async_trait;
use contracts::domain::a001_category::Category;
use contracts::domain::a002_product::{Product, ProductDraft};
use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::domain::{a001_category, a002_product};

/// Persistence boundary of the catalog core.
///
/// Each call either fully succeeds or reports a failure; nothing else is
/// assumed about the store's consistency.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All categories in catalog order
    async fn list_categories(&self) -> anyhow::Result<Vec<Category>>;

    /// Creates one category per name in a single batch
    async fn insert_categories(&self, names: &[String]) -> anyhow::Result<Vec<Category>>;

    /// Persists the drafts in a single batch, returns the stored count
    async fn insert_products(&self, drafts: Vec<ProductDraft>) -> anyhow::Result<usize>;

    /// All products, most recently created first
    async fn list_products(&self) -> anyhow::Result<Vec<Product>>;
}

/// SQLite store backed by the sea-orm repositories
#[derive(Debug, Clone, Copy, Default)]
pub struct SeaOrmCatalogStore;

#[async_trait]
impl CatalogStore for SeaOrmCatalogStore {
    async fn list_categories(&self) -> anyhow::Result<Vec<Category>> {
        a001_category::service::list_all().await
    }

    async fn insert_categories(&self, names: &[String]) -> anyhow::Result<Vec<Category>> {
        a001_category::service::create_many(names).await
    }

    async fn insert_products(&self, drafts: Vec<ProductDraft>) -> anyhow::Result<usize> {
        a002_product::service::create_many(drafts).await
    }

    async fn list_products(&self) -> anyhow::Result<Vec<Product>> {
        a002_product::service::list_all().await
    }
}

static CATALOG_STORE: Lazy<Arc<dyn CatalogStore>> = Lazy::new(|| Arc::new(SeaOrmCatalogStore));

/// Process-wide store used by the HTTP handlers
pub fn catalog_store() -> Arc<dyn CatalogStore> {
    CATALOG_STORE.clone()
}
