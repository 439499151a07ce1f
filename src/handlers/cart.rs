use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::handlers::common::{created_response, message_response, success_response};
use crate::services::pricing::{self, CartTotals, LineAmounts};
use crate::services::{CartLine, Receipt};
use crate::AppState;

/// Fallback identity for unauthenticated carts; the original storefront
/// shares one demo cart the same way.
pub const DEFAULT_USER_ID: &str = "demo-user";

/// Creates the router for cart, coupon, and checkout endpoints.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart).post(add_to_cart))
        .route("/:id", put(update_cart_item).delete(remove_cart_item))
        .route("/apply-coupon", post(apply_coupon))
        .route("/coupon/remove", delete(remove_coupon))
        .route("/checkout", post(checkout))
}

fn user_or_default(user_id: Option<String>) -> String {
    user_id
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_USER_ID.to_string())
}

// Request/response DTOs

#[derive(Debug, Deserialize, IntoParams)]
pub struct UserQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub user_id: Option<String>,
    pub product_id: Option<i32>,
    pub qty: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    pub user_id: Option<String>,
    pub qty: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ApplyCouponRequest {
    pub user_id: Option<String>,
    pub coupon_code: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Cart contents plus computed totals.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartViewResponse {
    pub cart: Vec<CartLine>,
    #[serde(flatten)]
    pub totals: CartTotals,
    pub item_count: i32,
}

/// Totals returned by the coupon endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct CouponTotalsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    #[serde(flatten)]
    pub totals: CartTotals,
}

/// Get the cart with totals for a user.
#[utoipa::path(
    get,
    path = "/api/cart",
    params(UserQuery),
    responses((status = 200, description = "Cart lines, totals, and item count", body = crate::ApiResponse<CartViewResponse>)),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let user_id = user_or_default(query.user_id);
    let cart = state.services.cart.view(&user_id).await?;

    let amounts: Vec<LineAmounts> = cart
        .iter()
        .map(|line| LineAmounts {
            price: line.price,
            qty: line.qty,
        })
        .collect();
    let totals =
        pricing::calculate_totals(&amounts, state.services.coupons.applied_rule(&user_id));
    let item_count = cart.iter().map(|line| line.qty).sum();

    Ok(success_response(CartViewResponse {
        cart,
        totals,
        item_count,
    }))
}

/// Add a product to the cart, merging quantities on repeat adds.
#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 201, description = "New cart line created"),
        (status = 200, description = "Existing line quantity incremented"),
        (status = 400, description = "Missing or invalid fields", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown product", body = crate::errors::ErrorResponse)
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<AddToCartRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let (product_id, qty) = match (payload.product_id, payload.qty) {
        (Some(product_id), Some(qty)) => (product_id, qty),
        _ => {
            return Err(ApiError::ValidationError(
                "product_id and qty are required".to_string(),
            ))
        }
    };
    let user_id = user_or_default(payload.user_id);

    let (item, created) = state
        .services
        .cart
        .add_item(&user_id, product_id, qty)
        .await?;

    if created {
        Ok(created_response("Item added to cart", item))
    } else {
        Ok(message_response("Cart updated", item))
    }
}

/// Replace the quantity of a cart line.
#[utoipa::path(
    put,
    path = "/api/cart/{id}",
    params(("id" = Uuid, Path, description = "Cart line id")),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Quantity updated"),
        (status = 400, description = "Quantity below 1", body = crate::errors::ErrorResponse),
        (status = 404, description = "No such line for this user", body = crate::errors::ErrorResponse)
    ),
    tag = "Cart"
)]
pub async fn update_cart_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateQuantityRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let qty = payload.qty.ok_or_else(|| {
        ApiError::ValidationError("Quantity must be at least 1".to_string())
    })?;
    let user_id = user_or_default(payload.user_id);

    let item = state
        .services
        .cart
        .update_quantity(&user_id, id, qty)
        .await?;
    Ok(message_response("Cart updated", item))
}

/// Remove a cart line.
#[utoipa::path(
    delete,
    path = "/api/cart/{id}",
    params(("id" = Uuid, Path, description = "Cart line id"), UserQuery),
    responses(
        (status = 200, description = "Line removed"),
        (status = 404, description = "No such line for this user", body = crate::errors::ErrorResponse)
    ),
    tag = "Cart"
)]
pub async fn remove_cart_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<UserQuery>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let user_id = user_or_default(query.user_id);
    let removed = state.services.cart.remove_item(&user_id, id).await?;
    Ok(message_response("Item removed from cart", removed))
}

/// Apply a coupon code to the user's cart.
#[utoipa::path(
    post,
    path = "/api/cart/apply-coupon",
    request_body = ApplyCouponRequest,
    responses(
        (status = 200, description = "Coupon applied; fresh totals returned", body = crate::ApiResponse<CouponTotalsResponse>),
        (status = 400, description = "Missing, unknown, or below-minimum coupon", body = crate::errors::ErrorResponse)
    ),
    tag = "Cart"
)]
pub async fn apply_coupon(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<ApplyCouponRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let code = payload.coupon_code.unwrap_or_default();
    let user_id = user_or_default(payload.user_id);

    let items = state.services.cart.items(&user_id).await?;
    let amounts: Vec<LineAmounts> = items.iter().map(LineAmounts::from).collect();
    let subtotal = pricing::calculate_totals(&amounts, None).subtotal;

    let rule = state
        .services
        .coupons
        .apply(&user_id, &code, subtotal)
        .await?;
    let totals = pricing::calculate_totals(&amounts, Some(rule));

    Ok(message_response(
        "Coupon applied successfully",
        CouponTotalsResponse {
            coupon_code: Some(rule.code.to_string()),
            totals,
        },
    ))
}

/// Remove the applied coupon. Idempotent.
#[utoipa::path(
    delete,
    path = "/api/cart/coupon/remove",
    params(UserQuery),
    responses((status = 200, description = "Association cleared; fresh totals returned", body = crate::ApiResponse<CouponTotalsResponse>)),
    tag = "Cart"
)]
pub async fn remove_coupon(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let user_id = user_or_default(query.user_id);
    state.services.coupons.remove(&user_id).await;

    let items = state.services.cart.items(&user_id).await?;
    let amounts: Vec<LineAmounts> = items.iter().map(LineAmounts::from).collect();
    let totals = pricing::calculate_totals(&amounts, None);

    Ok(message_response(
        "Coupon removed",
        CouponTotalsResponse {
            coupon_code: None,
            totals,
        },
    ))
}

/// Convert the cart into an order and return a receipt.
#[utoipa::path(
    post,
    path = "/api/cart/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Order created; cart and coupon cleared", body = crate::ApiResponse<Receipt>),
        (status = 400, description = "Missing customer fields or empty cart", body = crate::errors::ErrorResponse)
    ),
    tag = "Cart"
)]
pub async fn checkout(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CheckoutRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let (name, email) = match (payload.name, payload.email) {
        (Some(name), Some(email)) => (name, email),
        _ => {
            return Err(ApiError::ValidationError(
                "Name and email are required".to_string(),
            ))
        }
    };
    let user_id = user_or_default(payload.user_id);

    let receipt = state
        .services
        .checkout
        .checkout(&user_id, &name, &email)
        .await?;
    Ok(message_response("Checkout successful", receipt))
}
