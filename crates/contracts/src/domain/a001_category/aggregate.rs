use crate::domain::common::AggregateId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub Uuid);

impl CategoryId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl AggregateId for CategoryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CategoryId)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Named product grouping. Names are unique case-insensitively after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new_for_insert(name: &str) -> Self {
        Self {
            id: CategoryId::new_v4(),
            name: name.trim().to_string(),
        }
    }

    /// Comparison key for category names: trimmed and lower-cased.
    pub fn match_key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    pub fn key(&self) -> String {
        Self::match_key(&self.name)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Category name must not be empty".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_key_ignores_case_and_padding() {
        assert_eq!(Category::match_key("  Laptops "), "laptops");
        assert_eq!(Category::match_key("LAPTOPS"), Category::match_key("laptops"));
    }

    #[test]
    fn test_new_for_insert_trims_name() {
        let category = Category::new_for_insert(" Monitors ");
        assert_eq!(category.name, "Monitors");
        assert!(category.validate().is_ok());
        assert!(Category::new_for_insert("   ").validate().is_err());
    }
}
