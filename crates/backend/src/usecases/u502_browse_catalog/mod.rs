pub mod catalog_index;
pub mod grouper;
pub mod product_card;
pub mod service;

pub use catalog_index::CatalogIndex;
pub use product_card::CardBuilder;
pub use service::BrowseSettings;
