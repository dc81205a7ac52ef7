pub mod request;
pub mod response;

pub use request::ImportFormat;
pub use response::{ImportPhase, ImportSummary, RowError, RowErrorKind};

use crate::usecases::common::UseCaseMetadata;

pub struct ImportCatalog;

impl UseCaseMetadata for ImportCatalog {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "import_catalog"
    }

    fn display_name() -> &'static str {
        "Bulk product import"
    }

    fn description() -> &'static str {
        "Imports products from CSV, JSON or Excel files and creates missing categories"
    }
}
