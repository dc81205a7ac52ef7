pub mod aggregate;
pub mod rich_text;

pub use aggregate::{Product, ProductCondition, ProductDraft, ProductId};
pub use rich_text::RichText;
