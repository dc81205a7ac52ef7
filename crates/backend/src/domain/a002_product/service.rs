use super::repository;
use chrono::{DateTime, Duration, Utc};
use contracts::domain::a002_product::{Product, ProductDraft, ProductId};

pub async fn list_all() -> anyhow::Result<Vec<Product>> {
    repository::list_all().await
}

pub async fn get_by_id(id: ProductId) -> anyhow::Result<Option<Product>> {
    repository::get_by_id(id).await
}

/// Persists validated drafts as new products, returns how many were stored
pub async fn create_many(drafts: Vec<ProductDraft>) -> anyhow::Result<usize> {
    let products = products_from_drafts(drafts, Utc::now())?;
    repository::insert_many(&products).await
}

/// Turns drafts into products stamped from `now`. Each later row gets a
/// microsecond later timestamp so "most recent first" is a total order.
pub fn products_from_drafts(
    drafts: Vec<ProductDraft>,
    now: DateTime<Utc>,
) -> anyhow::Result<Vec<Product>> {
    drafts
        .into_iter()
        .enumerate()
        .map(|(i, draft)| {
            draft
                .validate()
                .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
            Ok(Product::from_draft(draft, now + Duration::microseconds(i as i64)))
        })
        .collect()
}
