use axum::http::StatusCode;
use contracts::usecases::common::UseCaseError;
use contracts::usecases::u501_import_catalog::{ImportFormat, ImportPhase};
use thiserror::Error;

/// Whole-import failures. Row-level problems never surface here, they are
/// reported through `ImportSummary::errors`.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error(
        "Unsupported file format '{0}'. Use one of: {accepted}",
        accepted = ImportFormat::SUPPORTED_EXTENSIONS.join(", ")
    )]
    UnsupportedFormat(String),

    #[error("Could not read file: {0}")]
    MalformedInput(String),

    #[error("The file contains no data rows")]
    EmptyDataset,

    #[error("Could not create categories: {0}")]
    ReconciliationFailure(String),

    #[error("Could not save products: {0}")]
    PersistenceFailure(String),
}

impl ImportError {
    /// Phase in which this failure is raised
    pub fn phase(&self) -> ImportPhase {
        match self {
            ImportError::UnsupportedFormat(_)
            | ImportError::MalformedInput(_)
            | ImportError::EmptyDataset => ImportPhase::Decoding,
            ImportError::ReconciliationFailure(_) => ImportPhase::Reconciling,
            ImportError::PersistenceFailure(_) => ImportPhase::Persisting,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ImportError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            ImportError::MalformedInput(_) => "MALFORMED_INPUT",
            ImportError::EmptyDataset => "EMPTY_DATASET",
            ImportError::ReconciliationFailure(_) => "RECONCILIATION_FAILURE",
            ImportError::PersistenceFailure(_) => "PERSISTENCE_FAILURE",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ImportError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ImportError::MalformedInput(_) | ImportError::EmptyDataset => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ImportError::ReconciliationFailure(_) | ImportError::PersistenceFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Single user-facing message carrying the underlying cause
    pub fn to_usecase_error(&self) -> UseCaseError {
        UseCaseError::new(self.code(), "Import failed").with_details(self.to_string())
    }
}
