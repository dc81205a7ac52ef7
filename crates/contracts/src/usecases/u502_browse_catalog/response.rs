use crate::domain::a001_category::CategoryId;
use crate::domain::a002_product::Product;
use serde::{Deserialize, Serialize};

/// Trailing bucket for products without a known category
pub const OTHERS_GROUP_NAME: &str = "Others";

/// Product as shown on a storefront card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCard {
    #[serde(flatten)]
    pub product: Product,
    #[serde(rename = "categoryName")]
    pub category_name: Option<String>,
    /// "₹45,000" or "Contact for Price"
    #[serde(rename = "priceLabel")]
    pub price_label: String,
    /// mailto: link for price inquiries, absent when no shop email is set
    #[serde(rename = "inquiryLink")]
    pub inquiry_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup<T> {
    /// `None` for the Others bucket
    #[serde(rename = "categoryId")]
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub products: Vec<T>,
}

/// Browsing output: category buckets by default, one ranked list while a
/// search or condition filter is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum CatalogLayout<T> {
    Grouped { groups: Vec<CategoryGroup<T>> },
    Flat { products: Vec<T> },
}

impl<T> CatalogLayout<T> {
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> CatalogLayout<U> {
        match self {
            CatalogLayout::Grouped { groups } => CatalogLayout::Grouped {
                groups: groups
                    .into_iter()
                    .map(|g| CategoryGroup {
                        category_id: g.category_id,
                        name: g.name,
                        products: g.products.into_iter().map(&mut f).collect(),
                    })
                    .collect(),
            },
            CatalogLayout::Flat { products } => CatalogLayout::Flat {
                products: products.into_iter().map(f).collect(),
            },
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CatalogLayout::Grouped { groups } => groups.iter().map(|g| g.products.len()).sum(),
            CatalogLayout::Flat { products } => products.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
