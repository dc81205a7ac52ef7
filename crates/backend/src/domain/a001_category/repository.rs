use chrono::Utc;
use contracts::domain::a001_category::{Category, CategoryId};
use contracts::domain::common::AggregateId;
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryOrder, Set, TransactionTrait};

use crate::shared::data::db::{get_connection, INSERT_CHUNK_ROWS};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Category {
    fn from(m: Model) -> Self {
        Category {
            id: CategoryId::from_string(&m.id).unwrap_or_else(|_| CategoryId::new_v4()),
            name: m.name,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// All categories in catalog order: by name, case-insensitive, then by creation
pub async fn list_all() -> anyhow::Result<Vec<Category>> {
    let mut models: Vec<Model> = Entity::find()
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(conn())
        .await?;
    models.sort_by_key(|m| m.name.to_lowercase());
    Ok(models.into_iter().map(Into::into).collect())
}

/// Inserts all categories in one transaction
pub async fn insert_many(categories: &[Category]) -> anyhow::Result<()> {
    insert_many_with(conn(), categories).await
}

pub async fn insert_many_with(
    db: &DatabaseConnection,
    categories: &[Category],
) -> anyhow::Result<()> {
    if categories.is_empty() {
        return Ok(());
    }
    let now = Utc::now();
    let txn = db.begin().await?;
    for chunk in categories.chunks(INSERT_CHUNK_ROWS) {
        let actives = chunk.iter().map(|c| ActiveModel {
            id: Set(c.id.as_string()),
            name: Set(c.name.clone()),
            created_at: Set(now),
        });
        Entity::insert_many(actives).exec(&txn).await?;
    }
    txn.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::open_database;
    use sea_orm::PaginatorTrait;

    #[tokio::test]
    async fn test_many_categories_fit_one_call() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_database(&dir.path().join("catalog.db")).await.unwrap();
        let categories: Vec<Category> = (0..12_000)
            .map(|i| Category::new_for_insert(&format!("Category {}", i)))
            .collect();

        insert_many_with(&db, &categories).await.unwrap();

        assert_eq!(Entity::find().count(&db).await.unwrap(), 12_000);
    }
}
