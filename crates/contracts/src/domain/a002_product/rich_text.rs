use serde::{Deserialize, Serialize};

/// Raw markup of a rich-text field (product specifications).
///
/// The plain-text projection used for search and previews is derived by the
/// backend once per use; this type only carries the stored markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText(String);

impl RichText {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn markup(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}
