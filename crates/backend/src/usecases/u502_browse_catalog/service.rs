use super::catalog_index;
use super::grouper;
use super::product_card::CardBuilder;
use crate::shared::config::Config;
use crate::shared::data::CatalogStore;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u502_browse_catalog::{
    BrowseCatalog, BrowseQuery, CatalogLayout, ProductCard,
};

/// Settings the browse path reads from configuration
#[derive(Debug, Clone)]
pub struct BrowseSettings {
    pub search_threshold: f64,
    pub shop_email: String,
}

impl BrowseSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            search_threshold: config.catalog.search_threshold,
            shop_email: config.shop.email.clone(),
        }
    }
}

/// Public storefront layout for the given filter and search text
pub async fn browse(
    store: &dyn CatalogStore,
    query: &BrowseQuery,
    settings: &BrowseSettings,
) -> anyhow::Result<CatalogLayout<ProductCard>> {
    let categories = store.list_categories().await?;
    let products = store.list_products().await?;

    let layout = grouper::layout(
        &products,
        &categories,
        query.filter,
        query.search_text(),
        settings.search_threshold,
    );
    tracing::debug!(
        "{}: filter={:?} q={:?} -> {} of {} products",
        BrowseCatalog::full_name(),
        query.filter,
        query.search_text(),
        layout.len(),
        products.len()
    );

    let cards = CardBuilder::new(&categories, &settings.shop_email);
    Ok(layout.map(|product| cards.card(product)))
}

/// Admin search: every product, including those still without an image
pub async fn admin_search(
    store: &dyn CatalogStore,
    q: Option<&str>,
    settings: &BrowseSettings,
) -> anyhow::Result<Vec<ProductCard>> {
    let categories = store.list_categories().await?;
    let products = store.list_products().await?;

    let hits = catalog_index::search(
        q.unwrap_or_default(),
        &products,
        &categories,
        settings.search_threshold,
    );

    let cards = CardBuilder::new(&categories, &settings.shop_email);
    Ok(hits.into_iter().map(|product| cards.card(product)).collect())
}
