use super::decoder;
use super::error::ImportError;
use super::normalizer;
use super::phase_tracker::PhaseTracker;
use super::reconciler;
use crate::shared::data::CatalogStore;
use contracts::domain::a001_category::Category;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_import_catalog::{
    ImportCatalog, ImportFormat, ImportPhase, ImportSummary,
};
use std::sync::Arc;

/// Executor for the bulk catalog import.
///
/// Phases run strictly in sequence: decode, reconcile categories, normalize
/// rows, persist products. Categories created before a later failure stay.
pub struct ImportExecutor {
    store: Arc<dyn CatalogStore>,
}

impl ImportExecutor {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Imports an uploaded file; categories are read from the store
    /// once the file has been decoded
    pub async fn import_upload(
        &self,
        bytes: &[u8],
        file_name: &str,
    ) -> Result<ImportSummary, ImportError> {
        tracing::info!(
            "{}: importing '{}' ({} bytes)",
            ImportCatalog::full_name(),
            file_name,
            bytes.len()
        );
        let tracker = PhaseTracker::new();
        self.run(&tracker, bytes, ImportFormat::extension_of(file_name), None)
            .await
    }

    /// Imports against a category snapshot the caller already holds
    pub async fn import_file(
        &self,
        bytes: &[u8],
        extension: &str,
        existing: &[Category],
    ) -> Result<ImportSummary, ImportError> {
        let tracker = PhaseTracker::new();
        self.run(&tracker, bytes, extension, Some(existing)).await
    }

    /// Runs the import, recording every phase on `tracker`. Without a
    /// snapshot, existing categories are loaded in the reconciling phase.
    pub async fn run(
        &self,
        tracker: &PhaseTracker,
        bytes: &[u8],
        extension: &str,
        existing: Option<&[Category]>,
    ) -> Result<ImportSummary, ImportError> {
        let fail = |error: ImportError| {
            tracker.fail(&error);
            error
        };

        tracker.advance(ImportPhase::Decoding);
        let rows = decoder::decode(bytes, extension).map_err(fail)?;

        tracker.advance(ImportPhase::Reconciling);
        let loaded;
        let existing = match existing {
            Some(snapshot) => snapshot,
            None => {
                loaded = self.store.list_categories().await.map_err(|e| {
                    fail(ImportError::ReconciliationFailure(format!(
                        "cannot read categories: {:#}",
                        e
                    )))
                })?;
                &loaded[..]
            }
        };
        let reconciliation = reconciler::reconcile(self.store.as_ref(), &rows, existing)
            .await
            .map_err(fail)?;

        tracker.advance(ImportPhase::Normalizing);
        let mut summary = ImportSummary {
            categories_created_count: reconciliation.created.len(),
            ..Default::default()
        };
        let mut drafts = Vec::with_capacity(rows.len());
        for row in &rows {
            match normalizer::normalize(row, &reconciliation.name_to_id) {
                Ok(draft) => drafts.push(draft),
                Err(error) => {
                    tracing::warn!("Skipping {}", error);
                    summary.record_skipped(error);
                }
            }
        }

        tracker.advance(ImportPhase::Persisting);
        if !drafts.is_empty() {
            summary.imported_count = self
                .store
                .insert_products(drafts)
                .await
                .map_err(|e| fail(ImportError::PersistenceFailure(format!("{:#}", e))))?;
        }

        tracker.advance(ImportPhase::Done);
        tracing::info!(
            "Import done in {} ms: {} imported, {} categories created, {} skipped",
            tracker.elapsed_ms(),
            summary.imported_count,
            summary.categories_created_count,
            summary.skipped_count
        );
        Ok(summary)
    }
}
