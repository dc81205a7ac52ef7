use super::catalog_index::CatalogIndex;
use contracts::domain::a001_category::{Category, CategoryId};
use contracts::domain::a002_product::Product;
use contracts::usecases::u502_browse_catalog::{
    BrowseFilter, CatalogLayout, CategoryGroup, OTHERS_GROUP_NAME,
};
use std::collections::HashMap;

/// Browsing layout of `products` (most recent first).
///
/// Only products with an image are shown. An active search or condition
/// filter yields one flat list, otherwise products are bucketed per category
/// in `categories` order with a trailing Others bucket.
pub fn layout<'a>(
    products: &'a [Product],
    categories: &[Category],
    filter: BrowseFilter,
    query: Option<&str>,
    threshold: f64,
) -> CatalogLayout<&'a Product> {
    let eligible: Vec<&'a Product> = products
        .iter()
        .filter(|p| p.has_image())
        .filter(|p| filter.accepts(p.condition))
        .collect();

    let query = query.map(str::trim).filter(|q| !q.is_empty());

    match query {
        Some(query) => CatalogLayout::Flat {
            products: CatalogIndex::build(eligible, categories)
                .with_threshold(threshold)
                .search(query),
        },
        None if !filter.is_all() => CatalogLayout::Flat { products: eligible },
        None => CatalogLayout::Grouped {
            groups: group_by_category(eligible, categories),
        },
    }
}

struct Bucket<'a> {
    category_id: CategoryId,
    name: String,
    products: Vec<&'a Product>,
}

/// Categories sharing a name (ignoring case) share one bucket, named after
/// the first of them.
pub fn group_by_category<'a>(
    products: Vec<&'a Product>,
    categories: &[Category],
) -> Vec<CategoryGroup<&'a Product>> {
    let mut buckets: Vec<Bucket<'a>> = Vec::new();
    let mut bucket_by_key: HashMap<String, usize> = HashMap::new();
    let mut bucket_by_id: HashMap<CategoryId, usize> = HashMap::new();

    for category in categories {
        let index = *bucket_by_key.entry(category.key()).or_insert_with(|| {
            buckets.push(Bucket {
                category_id: category.id,
                name: category.name.clone(),
                products: Vec::new(),
            });
            buckets.len() - 1
        });
        bucket_by_id.insert(category.id, index);
    }

    let mut others = Vec::new();
    for product in products {
        match product.category_id.and_then(|id| bucket_by_id.get(&id)) {
            Some(&index) => buckets[index].products.push(product),
            None => others.push(product),
        }
    }

    let mut groups: Vec<CategoryGroup<&'a Product>> = buckets
        .into_iter()
        .filter(|b| !b.products.is_empty())
        .map(|b| CategoryGroup {
            category_id: Some(b.category_id),
            name: b.name,
            products: b.products,
        })
        .collect();

    if !others.is_empty() {
        groups.push(CategoryGroup {
            category_id: None,
            name: OTHERS_GROUP_NAME.to_string(),
            products: others,
        });
    }
    groups
}
