//! Shared harness: boots the full application state against an in-memory
//! SQLite database and drives it through the router.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use serde_json::Value;
use tokio::sync::mpsc;
use tower::ServiceExt;
use uuid::Uuid;

use ecommart_api::{
    app_router,
    config::AppConfig,
    db,
    entities::product,
    events::{self, EventSender},
    handlers::AppServices,
    AppState,
};

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
}

#[allow(dead_code)]
impl TestApp {
    /// Boots the app on in-memory SQLite with the fixture catalog seeded.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new("sqlite::memory:", "test");
        // A single pooled connection keeps the in-memory database alive for
        // the whole test.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");
        let pool = Arc::new(pool);

        let (event_tx, event_rx) = mpsc::channel(64);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let services = AppServices::new(pool.clone(), event_sender.clone());
        services
            .catalog
            .seed_if_empty()
            .await
            .expect("failed to seed catalog");

        let state = AppState {
            db: pool,
            config: cfg,
            event_sender,
            services,
        };

        Self {
            router: app_router(state.clone()),
            state,
            _event_task: event_task,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body), None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body), None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None, None).await
    }

    pub async fn get_with_token(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, Some(token)).await
    }

    pub async fn post_with_token(
        &self,
        uri: &str,
        body: Value,
        token: &str,
    ) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body), Some(token)).await
    }

    async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("failed to build request"))
            .await
            .expect("request failed");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response was not JSON")
        };
        (status, json)
    }

    /// Inserts an extra product outside the fixture set.
    pub async fn insert_product(&self, id: i32, name: &str, price: Decimal) {
        let now = Utc::now();
        let model = product::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            price: Set(price),
            image: Set("/test.webp".to_string()),
            category: Set("Test".to_string()),
            product_type: Set("Test".to_string()),
            brand: Set(None),
            rating: Set(4.0),
            reviews: Set(1),
            in_stock: Set(true),
            description: Set("test product".to_string()),
            specifications: Set(serde_json::json!({})),
            shipping: Set(serde_json::json!({})),
            offers: Set(serde_json::json!([])),
            created_at: Set(now),
            updated_at: Set(now),
        };
        model
            .insert(&*self.state.db)
            .await
            .expect("failed to insert test product");
    }
}

/// Parses a decimal field that the API serializes as a string.
#[allow(dead_code)]
pub fn dec_field(value: &Value, key: &str) -> Decimal {
    value[key]
        .as_str()
        .unwrap_or_else(|| panic!("missing decimal field {key}: {value}"))
        .parse()
        .expect("field was not a decimal")
}

/// Unique per-test user id so carts do not interleave.
#[allow(dead_code)]
pub fn unique_user(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}
