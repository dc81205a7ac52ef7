pub mod request;
pub mod response;

pub use request::{BrowseFilter, BrowseQuery};
pub use response::{CatalogLayout, CategoryGroup, ProductCard, OTHERS_GROUP_NAME};

use crate::usecases::common::UseCaseMetadata;

pub struct BrowseCatalog;

impl UseCaseMetadata for BrowseCatalog {
    fn usecase_index() -> &'static str {
        "u502"
    }

    fn usecase_name() -> &'static str {
        "browse_catalog"
    }

    fn display_name() -> &'static str {
        "Catalog browsing"
    }

    fn description() -> &'static str {
        "Category-grouped catalog or a flat, relevance-ranked result list"
    }
}
