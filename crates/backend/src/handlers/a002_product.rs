use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a002_product::{Product, ProductId};
use contracts::domain::common::AggregateId;
use contracts::usecases::u502_browse_catalog::ProductCard;
use serde::Deserialize;

use crate::domain::{a001_category, a002_product};
use crate::shared::config;
use crate::shared::data::catalog_store;
use crate::system::auth::AdminSession;
use crate::usecases::u502_browse_catalog::{service, BrowseSettings, CardBuilder};

#[derive(Deserialize)]
pub struct ProductSearchQuery {
    pub q: Option<String>,
}

/// GET /api/product
/// Every product, newest first, including those still waiting for an image
pub async fn list_all(
    AdminSession(session): AdminSession,
) -> Result<Json<Vec<Product>>, StatusCode> {
    tracing::debug!("Product list requested by {}", session.username);
    match a002_product::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list products: {:#}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/product/search?q=
pub async fn search(
    AdminSession(_session): AdminSession,
    Query(params): Query<ProductSearchQuery>,
) -> Result<Json<Vec<ProductCard>>, StatusCode> {
    let settings = BrowseSettings::from_config(&config::current());
    let store = catalog_store();

    match service::admin_search(store.as_ref(), params.q.as_deref(), &settings).await {
        Ok(cards) => Ok(Json(cards)),
        Err(e) => {
            tracing::error!("Product search failed: {:#}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/product/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<ProductCard>, StatusCode> {
    let product_id = ProductId::from_string(&id).map_err(|_| StatusCode::BAD_REQUEST)?;

    let product = match a002_product::service::get_by_id(product_id).await {
        Ok(Some(product)) => product,
        Ok(None) => return Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load product {}: {:#}", id, e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let categories = a001_category::service::list_all().await.map_err(|e| {
        tracing::error!("Failed to list categories: {:#}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let config = config::current();
    Ok(Json(CardBuilder::new(&categories, &config.shop.email).card(&product)))
}
