//! Ecommart API Library
//!
//! Storefront backend: product catalog, shopping cart, coupon application,
//! and a checkout flow that snapshots the cart into an order record.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod coupons;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod fixtures;
pub mod handlers;
pub mod openapi;
pub mod request_id;
pub mod services;

use axum::{extract::State, response::Json, routing::get, Router};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::db::DbPool;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: handlers::AppServices,
}

/// Envelope for every successful response; failed requests use
/// [`errors::ErrorResponse`], which carries the same `success` flag.
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Serialize, ToSchema)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl ResponseMeta {
    fn capture() -> Self {
        Self {
            request_id: request_id::current_request_id(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
            meta: Some(ResponseMeta::capture()),
        }
    }

    pub fn success_with_message(message: &str, data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.to_string()),
            errors: None,
            meta: Some(ResponseMeta::capture()),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            errors: None,
            meta: Some(ResponseMeta::capture()),
        }
    }
}

/// Standard API result type for JSON responses.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

/// Builds the full application router (routes plus the request-id layer);
/// `main` adds the transport-level layers on top.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(service_banner))
        .route("/health", get(health_check))
        .nest("/api/products", handlers::products::products_routes())
        .nest("/api/cart", handlers::cart::cart_routes())
        .nest("/api/auth", handlers::auth::auth_routes())
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .layer(axum::middleware::from_fn(
            request_id::request_id_middleware,
        ))
        .with_state(state)
}

async fn service_banner(State(state): State<AppState>) -> ApiResult<Value> {
    let banner = json!({
        "message": "Ecommart storefront API",
        "version": env!("CARGO_PKG_VERSION"),
        "currency": state.config.default_currency,
        "endpoints": {
            "products": "/api/products",
            "cart": "/api/cart",
            "auth": "/api/auth",
            "docs": "/api-docs/openapi.json",
            "health": "/health",
        },
    });
    Ok(Json(ApiResponse::success(banner)))
}

async fn health_check(State(state): State<AppState>) -> ApiResult<Value> {
    let db_status = match state.db.ping().await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    let health = json!({
        "status": db_status,
        "checks": { "database": db_status },
        "timestamp": Utc::now().to_rfc3339(),
    });
    Ok(Json(ApiResponse::success(health)))
}

#[cfg(test)]
mod response_tests {
    use super::*;
    use crate::request_id::{scope_request_id, RequestId};
    use chrono::DateTime;

    #[tokio::test]
    async fn success_response_includes_request_metadata() {
        let response = scope_request_id(RequestId::new("meta-123"), async {
            ApiResponse::success("ok")
        })
        .await;

        assert!(response.success);
        let meta = response.meta.expect("metadata expected");
        assert_eq!(meta.request_id.as_deref(), Some("meta-123"));
        DateTime::parse_from_rfc3339(&meta.timestamp).expect("timestamp should parse");
    }

    #[tokio::test]
    async fn error_response_carries_message() {
        let response = ApiResponse::<()>::error("oops".into());
        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("oops"));
        assert!(response.data.is_none());
    }

    #[test]
    fn message_is_attached_alongside_data() {
        let response = ApiResponse::success_with_message("Cart updated", 5);
        assert!(response.success);
        assert_eq!(response.data, Some(5));
        assert_eq!(response.message.as_deref(), Some("Cart updated"));
    }
}
