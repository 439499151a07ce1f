use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Catalog product.
///
/// Products carry their full storefront payload (specifications, shipping
/// info, offer strings) as JSON columns. Rows are written by seeding only;
/// the API never mutates them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Catalog-assigned numeric id, stable across reseeds.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub price: Decimal,
    pub image: String,
    pub category: String,
    #[sea_orm(column_name = "kind")]
    #[serde(rename = "type")]
    pub product_type: String,
    #[sea_orm(nullable)]
    pub brand: Option<String>,
    pub rating: f64,
    pub reviews: i32,
    pub in_stock: bool,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Json")]
    #[schema(value_type = Object)]
    pub specifications: Json,
    #[sea_orm(column_type = "Json")]
    #[schema(value_type = Object)]
    pub shipping: Json,
    #[sea_orm(column_type = "Json")]
    #[schema(value_type = Object)]
    pub offers: Json,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
