use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, TransactionTrait,
};
use serde::Serialize;
use std::sync::Arc;
use strum::{Display, EnumString};
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::entities::{product, Product, ProductModel};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::fixtures;

/// Read-side catalog queries plus seeding.
///
/// Products are written only by seeding; everything else here is lookup,
/// filtering, and sorting over the seeded set.
#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DbPool>,
    events: EventSender,
}

/// Sort orders accepted by the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ProductSort {
    PriceAsc,
    PriceDesc,
    Rating,
    Popular,
    Newest,
}

/// Listing filters; all optional and combinable.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub product_type: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub search: Option<String>,
    pub sort: Option<ProductSort>,
}

/// Trimmed product summary shown in the related-products strip.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RelatedProduct {
    pub id: i32,
    pub name: String,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub image: String,
    pub rating: f64,
    pub reviews: i32,
}

impl From<ProductModel> for RelatedProduct {
    fn from(p: ProductModel) -> Self {
        Self {
            id: p.id,
            name: p.name,
            price: p.price,
            image: p.image,
            rating: p.rating,
            reviews: p.reviews,
        }
    }
}

/// Full product payload with its related-products strip.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: ProductModel,
    pub related_products: Vec<RelatedProduct>,
}

const RELATED_LIMIT: u64 = 4;

impl CatalogService {
    pub fn new(db: Arc<DbPool>, events: EventSender) -> Self {
        Self { db, events }
    }

    /// Lists products matching the filter, applying the requested sort
    /// (default: catalog id ascending).
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<ProductModel>, ServiceError> {
        let mut query = Product::find();

        if let Some(category) = &filter.category {
            query = query.filter(lower_eq(product::Column::Category, category));
        }
        if let Some(product_type) = &filter.product_type {
            query = query.filter(lower_eq(product::Column::ProductType, product_type));
        }
        if let Some(brand) = &filter.brand {
            query = query.filter(lower_eq(product::Column::Brand, brand));
        }
        if let Some(min) = filter.min_price {
            query = query.filter(product::Column::Price.gte(min));
        }
        if let Some(max) = filter.max_price {
            query = query.filter(product::Column::Price.lte(max));
        }
        if let Some(term) = &filter.search {
            let pattern = format!("%{}%", term.to_lowercase());
            query = query.filter(
                Condition::any()
                    .add(lower_like(product::Column::Name, &pattern))
                    .add(lower_like(product::Column::Brand, &pattern))
                    .add(lower_like(product::Column::Description, &pattern)),
            );
        }

        Ok(apply_sort(query, filter.sort).all(&*self.db).await?)
    }

    /// Fetches a product by catalog id along with up to four other products
    /// from the same category.
    #[instrument(skip(self))]
    pub async fn get_with_related(&self, id: i32) -> Result<ProductDetail, ServiceError> {
        let product = Product::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Product not found".to_string()))?;

        let related = Product::find()
            .filter(product::Column::Category.eq(product.category.clone()))
            .filter(product::Column::Id.ne(id))
            .order_by_asc(product::Column::Id)
            .limit(RELATED_LIMIT)
            .all(&*self.db)
            .await?;

        Ok(ProductDetail {
            product,
            related_products: related.into_iter().map(RelatedProduct::from).collect(),
        })
    }

    /// Lists products in a category (case-insensitive), catalog order.
    pub async fn by_category(&self, category: &str) -> Result<Vec<ProductModel>, ServiceError> {
        self.list(&ProductFilter {
            category: Some(category.to_string()),
            ..ProductFilter::default()
        })
        .await
    }

    /// Inserts the fixture catalog if the product table is empty. Returns
    /// the number of inserted products (0 when already seeded).
    #[instrument(skip(self))]
    pub async fn seed_if_empty(&self) -> Result<usize, ServiceError> {
        let existing = Product::find().count(&*self.db).await?;
        if existing > 0 {
            return Ok(0);
        }
        self.insert_fixtures(&*self.db).await
    }

    /// Wipes the catalog and reinserts the fixture set. Administrative
    /// operation; cart lines referencing removed ids simply drop out of cart
    /// views.
    #[instrument(skip(self))]
    pub async fn reseed(&self) -> Result<usize, ServiceError> {
        let txn = self.db.begin().await?;
        Product::delete_many().exec(&txn).await?;
        let models = fixtures::products();
        let count = models.len();
        Product::insert_many(models.into_iter().map(IntoActiveModel::into_active_model))
            .exec(&txn)
            .await?;
        txn.commit().await?;

        self.events
            .send_or_log(Event::CatalogSeeded { count })
            .await;
        info!("reseeded catalog with {} products", count);
        Ok(count)
    }

    async fn insert_fixtures(
        &self,
        conn: &impl sea_orm::ConnectionTrait,
    ) -> Result<usize, ServiceError> {
        let models = fixtures::products();
        let count = models.len();
        Product::insert_many(models.into_iter().map(IntoActiveModel::into_active_model))
            .exec(conn)
            .await?;

        self.events
            .send_or_log(Event::CatalogSeeded { count })
            .await;
        info!("seeded catalog with {} products", count);
        Ok(count)
    }
}

fn apply_sort(query: Select<Product>, sort: Option<ProductSort>) -> Select<Product> {
    match sort {
        Some(ProductSort::PriceAsc) => query.order_by_asc(product::Column::Price),
        Some(ProductSort::PriceDesc) => query.order_by_desc(product::Column::Price),
        Some(ProductSort::Rating) => query.order_by_desc(product::Column::Rating),
        Some(ProductSort::Popular) => query.order_by_desc(product::Column::Reviews),
        Some(ProductSort::Newest) => query.order_by_desc(product::Column::Id),
        None => query.order_by_asc(product::Column::Id),
    }
}

fn lower_eq(column: product::Column, value: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).eq(value.to_lowercase())
}

fn lower_like(column: product::Column, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(pattern)
}
