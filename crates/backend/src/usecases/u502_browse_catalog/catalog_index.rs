use crate::shared::rich_text::plain_text;
use contracts::domain::a001_category::{Category, CategoryId};
use contracts::domain::a002_product::Product;
use std::collections::HashMap;

/// Default cut-off: products scoring above it are not search hits
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Penalty per character of offset for substring hits, and its cap
const POSITION_PENALTY: f64 = 0.001;
const MAX_POSITION_PENALTY: f64 = 0.05;

struct IndexEntry<'a> {
    product: &'a Product,
    /// Lower-cased name, plain-text specs, category name
    keys: [String; 3],
}

#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    pub product: &'a Product,
    /// 0 is a perfect match, 1 no match at all
    pub score: f64,
}

/// Fuzzy index over a product corpus. Built per query; nothing is cached.
pub struct CatalogIndex<'a> {
    entries: Vec<IndexEntry<'a>>,
    threshold: f64,
}

impl<'a> CatalogIndex<'a> {
    pub fn build<I>(products: I, categories: &[Category]) -> Self
    where
        I: IntoIterator<Item = &'a Product>,
    {
        let names: HashMap<CategoryId, String> = categories
            .iter()
            .map(|c| (c.id, c.name.to_lowercase()))
            .collect();

        let entries = products
            .into_iter()
            .map(|product| {
                let category = product
                    .category_id
                    .and_then(|id| names.get(&id).cloned())
                    .unwrap_or_default();
                IndexEntry {
                    product,
                    keys: [
                        product.name.to_lowercase(),
                        plain_text(&product.specs).to_lowercase(),
                        category,
                    ],
                }
            })
            .collect();

        Self {
            entries,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Hits best first; equal scores keep corpus order
    pub fn search_scored(&self, query: &str) -> Vec<SearchHit<'a>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self
                .entries
                .iter()
                .map(|e| SearchHit {
                    product: e.product,
                    score: 0.0,
                })
                .collect();
        }

        let mut hits: Vec<SearchHit<'a>> = self
            .entries
            .iter()
            .map(|entry| SearchHit {
                product: entry.product,
                score: entry
                    .keys
                    .iter()
                    .map(|key| match_score(&query, key))
                    .fold(1.0, f64::min),
            })
            .filter(|hit| hit.score <= self.threshold)
            .collect();

        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        hits
    }

    pub fn search(&self, query: &str) -> Vec<&'a Product> {
        self.search_scored(query)
            .into_iter()
            .map(|hit| hit.product)
            .collect()
    }
}

/// Builds a fresh index and searches it
pub fn search<'a>(
    query: &str,
    products: &'a [Product],
    categories: &[Category],
    threshold: f64,
) -> Vec<&'a Product> {
    CatalogIndex::build(products, categories)
        .with_threshold(threshold)
        .search(query)
}

/// Score of a lower-cased query against one lower-cased key.
///
/// A substring hit scores its offset penalty only. Otherwise the key is
/// compared window by window, windows being up to one character shorter or
/// longer than the query, and the closest window wins.
pub fn match_score(query: &str, key: &str) -> f64 {
    if key.is_empty() {
        return 1.0;
    }
    if let Some(offset) = key.find(query) {
        let chars_before = key[..offset].chars().count();
        return (chars_before as f64 * POSITION_PENALTY).min(MAX_POSITION_PENALTY);
    }

    let key_chars: Vec<char> = key.chars().collect();
    let query_len = query.chars().count();
    let min_window = query_len.saturating_sub(1).max(1);
    let max_window = query_len + 1;

    if key_chars.len() <= min_window {
        return 1.0 - strsim::normalized_levenshtein(query, key);
    }

    let mut best = 0.0_f64;
    for window_len in min_window..=max_window.min(key_chars.len()) {
        for window in key_chars.windows(window_len) {
            let window: String = window.iter().collect();
            best = best.max(strsim::normalized_levenshtein(query, &window));
            if best >= 1.0 {
                return 0.0;
            }
        }
    }
    1.0 - best
}
