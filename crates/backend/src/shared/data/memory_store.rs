use async_trait::async_trait;
use chrono::Utc;
use contracts::domain::a001_category::Category;
use contracts::domain::a002_product::{Product, ProductDraft};
use std::sync::Mutex;

use super::catalog_store::CatalogStore;
use crate::domain::a002_product::service::products_from_drafts;

/// In-memory `CatalogStore` for tests, with switches to simulate failures
#[derive(Default)]
pub struct InMemoryCatalogStore {
    categories: Mutex<Vec<Category>>,
    products: Mutex<Vec<Product>>,
    fail_category_list: bool,
    fail_category_insert: bool,
    fail_product_insert: bool,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(names: &[&str]) -> Self {
        let store = Self::new();
        store
            .categories
            .lock()
            .unwrap()
            .extend(names.iter().map(|n| Category::new_for_insert(n)));
        store
    }

    pub fn failing_category_list(mut self) -> Self {
        self.fail_category_list = true;
        self
    }

    pub fn failing_category_insert(mut self) -> Self {
        self.fail_category_insert = true;
        self
    }

    pub fn failing_product_insert(mut self) -> Self {
        self.fail_product_insert = true;
        self
    }

    pub fn categories(&self) -> Vec<Category> {
        self.categories.lock().unwrap().clone()
    }

    pub fn products(&self) -> Vec<Product> {
        self.products.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn list_categories(&self) -> anyhow::Result<Vec<Category>> {
        if self.fail_category_list {
            anyhow::bail!("categories table is unreachable");
        }
        let mut categories = self.categories();
        categories.sort_by_key(|c| c.name.to_lowercase());
        Ok(categories)
    }

    async fn insert_categories(&self, names: &[String]) -> anyhow::Result<Vec<Category>> {
        if self.fail_category_insert {
            anyhow::bail!("categories table is read-only");
        }
        let created: Vec<Category> = names.iter().map(|n| Category::new_for_insert(n)).collect();
        self.categories.lock().unwrap().extend(created.iter().cloned());
        Ok(created)
    }

    async fn insert_products(&self, drafts: Vec<ProductDraft>) -> anyhow::Result<usize> {
        if self.fail_product_insert {
            anyhow::bail!("products table is read-only");
        }
        let products = products_from_drafts(drafts, Utc::now())?;
        let count = products.len();
        self.products.lock().unwrap().extend(products);
        Ok(count)
    }

    async fn list_products(&self) -> anyhow::Result<Vec<Product>> {
        let mut products = self.products();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }
}
