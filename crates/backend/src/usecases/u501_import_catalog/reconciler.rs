use super::decoder::RawImportRow;
use super::error::ImportError;
use crate::shared::data::CatalogStore;
use contracts::domain::a001_category::{Category, CategoryId};
use std::collections::{HashMap, HashSet};

/// Category ids for every category name a batch can reference, keyed by
/// `Category::match_key`.
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    pub name_to_id: HashMap<String, CategoryId>,
    pub created: Vec<Category>,
}

/// Category names the rows reference that `existing` does not know yet.
/// First spelling of each name wins, in first-seen order.
pub fn missing_category_names(rows: &[RawImportRow], existing: &[Category]) -> Vec<String> {
    let mut seen: HashSet<String> = existing.iter().map(Category::key).collect();
    let mut missing = Vec::new();

    for row in rows {
        let Some(name) = row.get("category").map(str::trim) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        if seen.insert(Category::match_key(name)) {
            missing.push(name.to_string());
        }
    }
    missing
}

/// Lookup map over a category list. When several categories share a key
/// the first one in list order wins.
pub fn index_by_name(categories: &[Category]) -> HashMap<String, CategoryId> {
    let mut map = HashMap::new();
    for category in categories {
        map.entry(category.key()).or_insert(category.id);
    }
    map
}

/// Creates the missing categories in one batch, then re-reads the full set
/// so both old and new categories resolve.
pub async fn reconcile(
    store: &dyn CatalogStore,
    rows: &[RawImportRow],
    existing: &[Category],
) -> Result<Reconciliation, ImportError> {
    let missing = missing_category_names(rows, existing);

    let created = if missing.is_empty() {
        Vec::new()
    } else {
        tracing::info!("Creating {} new categories: {:?}", missing.len(), missing);
        store
            .insert_categories(&missing)
            .await
            .map_err(|e| ImportError::ReconciliationFailure(format!("{:#}", e)))?
    };

    let all = store.list_categories().await.map_err(|e| {
        ImportError::ReconciliationFailure(format!("cannot re-read categories: {:#}", e))
    })?;

    Ok(Reconciliation {
        name_to_id: index_by_name(&all),
        created,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::memory_store::InMemoryCatalogStore;

    fn row(n: usize, category: Option<&str>) -> RawImportRow {
        let mut fields = HashMap::new();
        fields.insert("name".to_string(), format!("Product {}", n));
        if let Some(category) = category {
            fields.insert("category".to_string(), category.to_string());
        }
        RawImportRow::new(n, fields)
    }

    #[test]
    fn test_missing_names_are_deduped_case_insensitively() {
        let existing = vec![Category::new_for_insert("Laptops")];
        let rows = vec![
            row(1, Some("laptops")),
            row(2, Some(" Monitors ")),
            row(3, Some("MONITORS")),
            row(4, None),
            row(5, Some("   ")),
            row(6, Some("Mice")),
        ];

        assert_eq!(
            missing_category_names(&rows, &existing),
            vec!["Monitors".to_string(), "Mice".to_string()]
        );
    }

    #[test]
    fn test_index_keeps_first_duplicate() {
        let first = Category::new_for_insert("Laptops");
        let second = Category::new_for_insert("LAPTOPS");
        let map = index_by_name(&[first.clone(), second]);

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("laptops"), Some(&first.id));
    }

    #[tokio::test]
    async fn test_reconcile_resolves_existing_and_created() {
        let store = InMemoryCatalogStore::with_categories(&["Laptops"]);
        let existing = store.list_categories().await.unwrap();
        let rows = vec![row(1, Some("LAPTOPS")), row(2, Some("Monitors"))];

        let result = reconcile(&store, &rows, &existing).await.unwrap();

        assert_eq!(result.created.len(), 1);
        assert_eq!(result.created[0].name, "Monitors");
        assert_eq!(result.name_to_id.get("laptops"), Some(&existing[0].id));
        assert_eq!(result.name_to_id.get("monitors"), Some(&result.created[0].id));
        assert_eq!(store.categories().len(), 2);
    }

    #[tokio::test]
    async fn test_reconcile_without_new_names_inserts_nothing() {
        let store =
            InMemoryCatalogStore::with_categories(&["Laptops"]).failing_category_insert();
        let existing = store.list_categories().await.unwrap();

        let result = reconcile(&store, &[row(1, Some("laptops"))], &existing)
            .await
            .unwrap();
        assert!(result.created.is_empty());
    }

    #[tokio::test]
    async fn test_reconcile_insert_failure_is_fatal() {
        let store = InMemoryCatalogStore::new().failing_category_insert();

        let result = reconcile(&store, &[row(1, Some("Tablets"))], &[]).await;
        assert!(matches!(result, Err(ImportError::ReconciliationFailure(_))));
    }
}
