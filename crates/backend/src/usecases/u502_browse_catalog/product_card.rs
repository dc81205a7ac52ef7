use crate::shared::format::price_label;
use crate::shared::rich_text::summary;
use contracts::domain::a001_category::{Category, CategoryId};
use contracts::domain::a002_product::Product;
use contracts::usecases::u502_browse_catalog::ProductCard;
use std::collections::HashMap;

const INQUIRY_SPEC_SUMMARY_CHARS: usize = 50;

/// Resolves what a storefront card shows next to the raw product
pub struct CardBuilder<'c> {
    category_names: HashMap<CategoryId, &'c str>,
    shop_email: &'c str,
}

impl<'c> CardBuilder<'c> {
    pub fn new(categories: &'c [Category], shop_email: &'c str) -> Self {
        Self {
            category_names: categories.iter().map(|c| (c.id, c.name.as_str())).collect(),
            shop_email: shop_email.trim(),
        }
    }

    pub fn card(&self, product: &Product) -> ProductCard {
        ProductCard {
            product: product.clone(),
            category_name: product
                .category_id
                .and_then(|id| self.category_names.get(&id))
                .map(|name| name.to_string()),
            price_label: price_label(product.price),
            inquiry_link: inquiry_link(product, self.shop_email),
        }
    }
}

/// `mailto:` link asking the shop for price and availability.
/// `None` when no shop address is configured.
pub fn inquiry_link(product: &Product, shop_email: &str) -> Option<String> {
    let shop_email = shop_email.trim();
    if shop_email.is_empty() {
        return None;
    }

    let subject = format!("Inquiry for Product: {}", product.name);
    let body = format!(
        "Hi,\n\nI am interested in the following product:\n\n\
         Name: {}\nCondition: {}\nSpec Summary: {}\n\n\
         Please let me know the price and availability.\n\nThanks!",
        product.name,
        product.condition,
        summary(&product.specs, INQUIRY_SPEC_SUMMARY_CHARS)
    );

    Some(format!(
        "mailto:{}?subject={}&body={}",
        shop_email,
        urlencoding::encode(&subject),
        urlencoding::encode(&body)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use contracts::domain::a002_product::{ProductCondition, ProductDraft, RichText};
    use rust_decimal::Decimal;

    fn product(category: Option<&Category>, price: Option<Decimal>) -> Product {
        Product::from_draft(
            ProductDraft {
                name: "Dell 3420".to_string(),
                specs: RichText::new("<p>Intel i5 11th gen, 8GB RAM, 512GB NVMe SSD, 14 inch FHD</p>"),
                price,
                condition: ProductCondition::Refurbished,
                category_id: category.map(|c| c.id),
                image_url: None,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_card_resolves_category_and_price() {
        let laptops = Category::new_for_insert("Laptops");
        let categories = vec![laptops.clone()];
        let builder = CardBuilder::new(&categories, "");

        let card = builder.card(&product(Some(&laptops), Some(Decimal::new(45000, 0))));
        assert_eq!(card.category_name.as_deref(), Some("Laptops"));
        assert_eq!(card.price_label, "₹45,000");
        assert_eq!(card.inquiry_link, None);

        let card = builder.card(&product(None, None));
        assert_eq!(card.category_name, None);
        assert_eq!(card.price_label, "Contact for Price");
    }

    #[test]
    fn test_inquiry_link_is_encoded_mailto() {
        let link = inquiry_link(&product(None, None), " shop@example.com ").unwrap();

        assert!(link.starts_with("mailto:shop@example.com?subject=Inquiry%20for%20Product%3A%20Dell%203420&body="));
        assert!(link.contains("Condition%3A%20refurbished"));
        assert!(link.contains("Spec%20Summary%3A%20Intel%20i5"));
        assert!(link.contains("..."));
        assert!(!link.contains(' '));
    }
}
