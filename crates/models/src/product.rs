use rust_decimal::Decimal;
use sea_orm::{entity::prelude::*, Select};
use serde::{Deserialize, Serialize};

use crate::json_fields;

/// A catalog record in the `products` table.
///
/// The same struct is served as JSON and kept in the in-memory fallback.
/// `price` is a `DECIMAL(10,2)` column written out as a JSON number, and a NULL
/// `description` is served as `""`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    #[serde(with = "json_fields::decimal")]
    pub price: Decimal,
    pub category: String,
    pub stock: i32,
    #[sea_orm(nullable)]
    #[serde(default, serialize_with = "json_fields::empty_if_null")]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// LIKE pattern matching `search` anywhere in the name.
///
/// `%` and `_` inside `search` keep their wildcard meaning.
pub fn search_pattern(search: &str) -> String {
    format!("%{search}%")
}

/// Select every column, narrowed by the optional filters.
///
/// Predicates are appended in a fixed order (category, then name) and joined
/// with AND; values are bound as parameters. No ORDER BY is added, so row order
/// is whatever the backend returns. Name matching is `LIKE`, so its case
/// sensitivity follows the column collation.
pub fn filtered(category: Option<&str>, search: Option<&str>) -> Select<Entity> {
    let mut query = Entity::find();
    if let Some(category) = category {
        query = query.filter(Column::Category.eq(category));
    }
    if let Some(search) = search {
        query = query.filter(Column::Name.like(search_pattern(search)));
    }
    query
}
