use crate::domain::a002_product::ProductCondition;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowseFilter {
    #[default]
    All,
    New,
    Refurbished,
}

impl BrowseFilter {
    pub fn accepts(&self, condition: ProductCondition) -> bool {
        match self {
            BrowseFilter::All => true,
            BrowseFilter::New => condition == ProductCondition::New,
            BrowseFilter::Refurbished => condition == ProductCondition::Refurbished,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, BrowseFilter::All)
    }
}

/// Query string of the browse endpoint: `?filter=refurbished&q=dell`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowseQuery {
    #[serde(default)]
    pub filter: BrowseFilter,
    #[serde(default)]
    pub q: Option<String>,
}

impl BrowseQuery {
    /// Trimmed search text, `None` when blank
    pub fn search_text(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}
