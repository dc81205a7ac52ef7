use contracts::domain::a001_category::CategoryId;
use contracts::domain::common::AggregateId;
use contracts::domain::a002_product::{Product, ProductCondition, ProductId, RichText};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryOrder, Set, TransactionTrait};

use crate::shared::data::db::{get_connection, INSERT_CHUNK_ROWS};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub specs: String,
    /// Decimal text, exact
    pub price: Option<String>,
    pub condition: String,
    pub category_id: Option<String>,
    pub image_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        let id = ProductId::from_string(&m.id).unwrap_or_else(|_| ProductId::new_v4());
        let price = m.price.as_deref().and_then(|p| Decimal::from_str(p).ok());
        let category_id = m
            .category_id
            .as_deref()
            .and_then(|c| CategoryId::from_string(c).ok());

        Product {
            id,
            name: m.name,
            specs: RichText::new(m.specs),
            price,
            condition: ProductCondition::from_loose(&m.condition),
            category_id,
            image_url: m.image_url,
            created_at: m.created_at,
        }
    }
}

fn to_active(product: &Product) -> ActiveModel {
    ActiveModel {
        id: Set(product.id.as_string()),
        name: Set(product.name.clone()),
        specs: Set(product.specs.markup().to_string()),
        price: Set(product.price.map(|p| p.to_string())),
        condition: Set(product.condition.as_str().to_string()),
        category_id: Set(product.category_id.map(|c| c.as_string())),
        image_url: Set(product.image_url.clone()),
        created_at: Set(product.created_at),
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// All products, most recently created first
pub async fn list_all() -> anyhow::Result<Vec<Product>> {
    let items = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: ProductId) -> anyhow::Result<Option<Product>> {
    let result = Entity::find_by_id(id.as_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Inserts the batch in a single transaction: all rows or none
pub async fn insert_many(products: &[Product]) -> anyhow::Result<usize> {
    insert_many_with(conn(), products).await
}

pub async fn insert_many_with(
    db: &DatabaseConnection,
    products: &[Product],
) -> anyhow::Result<usize> {
    if products.is_empty() {
        return Ok(0);
    }
    let txn = db.begin().await?;
    for chunk in products.chunks(INSERT_CHUNK_ROWS) {
        Entity::insert_many(chunk.iter().map(to_active))
            .exec(&txn)
            .await?;
    }
    txn.commit().await?;
    Ok(products.len())
}
