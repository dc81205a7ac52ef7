// Aggregate handlers
pub mod a001_category;
pub mod a002_product;

// UseCase handlers
pub mod usecases;
