use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::errors::ApiError;
use crate::handlers::common::success_response;
use crate::services::{ProductFilter, ProductSort};
use crate::AppState;

/// Creates the router for catalog endpoints.
pub fn products_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/:id", get(get_product))
        .route("/category/:category", get(products_by_category))
}

/// Filters accepted by the product listing. Unknown `sort` values are
/// ignored rather than rejected.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ProductQuery {
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub brand: Option<String>,
    #[param(value_type = Option<String>)]
    pub min_price: Option<Decimal>,
    #[param(value_type = Option<String>)]
    pub max_price: Option<Decimal>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

/// List products with optional filtering, search, and sorting.
#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Matching products"),
        (status = 500, description = "Database failure", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let filter = ProductFilter {
        category: query.category,
        product_type: query.product_type,
        brand: query.brand,
        min_price: query.min_price,
        max_price: query.max_price,
        search: query.search,
        sort: query.sort.as_deref().and_then(|s| s.parse::<ProductSort>().ok()),
    };

    let products = state.services.catalog.list(&filter).await?;
    Ok(success_response(products))
}

/// Get a single product with its related-products strip.
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Catalog product id")),
    responses(
        (status = 200, description = "Product with related products"),
        (status = 404, description = "Unknown product", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let detail = state.services.catalog.get_with_related(id).await?;
    Ok(success_response(detail))
}

/// List products in a category (case-insensitive).
#[utoipa::path(
    get,
    path = "/api/products/category/{category}",
    params(("category" = String, Path, description = "Category name")),
    responses((status = 200, description = "Products in the category")),
    tag = "Products"
)]
pub async fn products_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let products = state.services.catalog.by_category(&category).await?;
    Ok(success_response(products))
}
