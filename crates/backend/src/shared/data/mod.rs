pub mod catalog_store;
pub mod db;
#[cfg(test)]
pub mod memory_store;

pub use catalog_store::{catalog_store, CatalogStore, SeaOrmCatalogStore};
