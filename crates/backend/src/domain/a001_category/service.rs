use super::repository;
use contracts::domain::a001_category::Category;

pub async fn list_all() -> anyhow::Result<Vec<Category>> {
    repository::list_all().await
}

/// Creates one category per name, in the given order. Callers dedupe names.
pub async fn create_many(names: &[String]) -> anyhow::Result<Vec<Category>> {
    let categories: Vec<Category> = names
        .iter()
        .map(|name| Category::new_for_insert(name))
        .collect();

    for category in &categories {
        category
            .validate()
            .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    }

    repository::insert_many(&categories).await?;
    tracing::info!("Created {} categories", categories.len());
    Ok(categories)
}
