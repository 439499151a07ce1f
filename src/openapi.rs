//! OpenAPI document for the storefront API, served as plain JSON.

use axum::Json;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ecommart API",
        description = "Storefront backend: catalog, cart, coupons, checkout, and sessions."
    ),
    paths(
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::products_by_category,
        handlers::cart::get_cart,
        handlers::cart::add_to_cart,
        handlers::cart::update_cart_item,
        handlers::cart::remove_cart_item,
        handlers::cart::apply_coupon,
        handlers::cart::remove_coupon,
        handlers::cart::checkout,
        handlers::auth::guest_session,
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::current_user,
        handlers::auth::logout,
    ),
    components(schemas(
        crate::entities::ProductModel,
        crate::entities::CartItemModel,
        crate::errors::ErrorResponse,
        crate::services::CartLine,
        crate::services::CartTotals,
        crate::services::ProductDetail,
        crate::services::RelatedProduct,
        crate::services::Receipt,
        crate::services::ReceiptItem,
        crate::services::AuthSession,
        crate::services::UserResponse,
        handlers::cart::AddToCartRequest,
        handlers::cart::UpdateQuantityRequest,
        handlers::cart::ApplyCouponRequest,
        handlers::cart::CheckoutRequest,
        handlers::cart::CartViewResponse,
        handlers::cart::CouponTotalsResponse,
        handlers::auth::GuestRequest,
        handlers::auth::RegisterRequest,
        handlers::auth::LoginRequest,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "Products", description = "Catalog browsing"),
        (name = "Cart", description = "Cart, coupons, and checkout"),
        (name = "Auth", description = "Guest and account sessions"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "Bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("opaque")
                        .build(),
                ),
            );
        }
    }
}

/// `GET /api-docs/openapi.json`
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
