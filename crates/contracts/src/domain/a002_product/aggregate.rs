use crate::domain::a001_category::CategoryId;
use crate::domain::common::AggregateId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RichText;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl AggregateId for ProductId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProductId)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Condition
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCondition {
    #[default]
    New,
    Refurbished,
}

impl ProductCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCondition::New => "new",
            ProductCondition::Refurbished => "refurbished",
        }
    }

    /// Lenient parse used for imported text: only `refurbished` (any case,
    /// surrounding whitespace ignored) is refurbished, everything else is new.
    pub fn from_loose(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("refurbished") {
            ProductCondition::Refurbished
        } else {
            ProductCondition::New
        }
    }
}

impl std::fmt::Display for ProductCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Draft
// ============================================================================

/// Normalized product that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub specs: RichText,
    pub price: Option<Decimal>,
    pub condition: ProductCondition,
    #[serde(rename = "categoryId")]
    pub category_id: Option<CategoryId>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

impl ProductDraft {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Product name must not be empty".into());
        }
        if matches!(self.price, Some(p) if p.is_sign_negative()) {
            return Err("Product price must not be negative".into());
        }
        Ok(())
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub specs: RichText,
    /// `None` means "Contact for Price"
    pub price: Option<Decimal>,
    pub condition: ProductCondition,
    #[serde(rename = "categoryId")]
    pub category_id: Option<CategoryId>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn from_draft(draft: ProductDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id: ProductId::new_v4(),
            name: draft.name,
            specs: draft.specs,
            price: draft.price,
            condition: draft.condition,
            category_id: draft.category_id,
            image_url: draft.image_url,
            created_at,
        }
    }

    /// Products still waiting for an image are hidden from public browsing.
    pub fn has_image(&self) -> bool {
        self.image_url
            .as_deref()
            .map_or(false, |url| !url.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_defaults_to_new_for_unknown_values() {
        assert_eq!(ProductCondition::from_loose("Refurbished"), ProductCondition::Refurbished);
        assert_eq!(ProductCondition::from_loose(" REFURBISHED "), ProductCondition::Refurbished);
        assert_eq!(ProductCondition::from_loose("used"), ProductCondition::New);
        assert_eq!(ProductCondition::from_loose(""), ProductCondition::New);
    }

    #[test]
    fn test_condition_serializes_lowercase() {
        let json = serde_json::to_string(&ProductCondition::Refurbished).unwrap();
        assert_eq!(json, "\"refurbished\"");
    }

    #[test]
    fn test_draft_validation_rejects_blank_name_and_negative_price() {
        let mut draft = ProductDraft {
            name: "Dell 3420".into(),
            specs: RichText::empty(),
            price: Some(Decimal::new(45000, 0)),
            condition: ProductCondition::New,
            category_id: None,
            image_url: None,
        };
        assert!(draft.validate().is_ok());

        draft.price = Some(Decimal::new(-1, 0));
        assert!(draft.validate().is_err());

        draft.price = None;
        draft.name = "  ".into();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_image_less_products_are_not_browsable() {
        let draft = ProductDraft {
            name: "HP Pavilion".into(),
            specs: RichText::empty(),
            price: None,
            condition: ProductCondition::New,
            category_id: None,
            image_url: Some("  ".into()),
        };
        let product = Product::from_draft(draft, Utc::now());
        assert!(!product.has_image());
    }
}
