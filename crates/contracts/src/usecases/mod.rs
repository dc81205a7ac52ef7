pub mod common;
pub mod u501_import_catalog;
pub mod u502_browse_catalog;
