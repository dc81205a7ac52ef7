pub mod decoder;
pub mod error;
pub mod executor;
pub mod normalizer;
pub mod phase_tracker;
pub mod reconciler;

pub use error::ImportError;
pub use executor::ImportExecutor;
pub use phase_tracker::PhaseTracker;
