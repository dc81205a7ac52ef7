use axum::{
    extract::{Multipart, Query},
    http::StatusCode,
    Json,
};
use contracts::usecases::common::UseCaseError;
use contracts::usecases::u501_import_catalog::ImportSummary;
use contracts::usecases::u502_browse_catalog::{BrowseQuery, CatalogLayout, ProductCard};
use once_cell::sync::Lazy;

use crate::shared::config;
use crate::shared::data::catalog_store;
use crate::system::auth::AdminSession;
use crate::usecases::{u501_import_catalog, u502_browse_catalog};

type UseCaseFailure = (StatusCode, Json<UseCaseError>);

// ============================================================================
// UseCase u501: Import catalog
// ============================================================================

static IMPORT_EXECUTOR: Lazy<u501_import_catalog::ImportExecutor> =
    Lazy::new(|| u501_import_catalog::ImportExecutor::new(catalog_store()));

/// POST /api/u501/import (multipart, field `file`)
pub async fn u501_import(
    AdminSession(session): AdminSession,
    mut multipart: Multipart,
) -> Result<Json<ImportSummary>, UseCaseFailure> {
    let bad_upload = |e: axum::extract::multipart::MultipartError| {
        (
            StatusCode::BAD_REQUEST,
            Json(UseCaseError::validation("Invalid upload").with_details(e.to_string())),
        )
    };

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(bad_upload)? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(bad_upload)?;
        upload = Some((file_name, bytes));
        break;
    }

    let Some((file_name, bytes)) = upload else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(UseCaseError::validation("Multipart field 'file' is required")),
        ));
    };

    tracing::info!("Import of '{}' started by {}", file_name, session.username);
    match IMPORT_EXECUTOR.import_upload(&bytes, &file_name).await {
        Ok(summary) => Ok(Json(summary)),
        Err(e) => {
            tracing::warn!("Import of '{}' failed while {}: {}", file_name, e.phase(), e);
            Err((e.status_code(), Json(e.to_usecase_error())))
        }
    }
}

// ============================================================================
// UseCase u502: Browse catalog
// ============================================================================

/// GET /api/u502/catalog?filter=&q=
pub async fn u502_browse(
    Query(query): Query<BrowseQuery>,
) -> Result<Json<CatalogLayout<ProductCard>>, UseCaseFailure> {
    let settings = u502_browse_catalog::BrowseSettings::from_config(&config::current());
    let store = catalog_store();

    match u502_browse_catalog::service::browse(store.as_ref(), &query, &settings).await {
        Ok(layout) => Ok(Json(layout)),
        Err(e) => {
            tracing::error!("Failed to browse catalog: {:#}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(UseCaseError::internal("Could not load the catalog").with_details(e.to_string())),
            ))
        }
    }
}
