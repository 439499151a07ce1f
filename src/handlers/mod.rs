pub mod auth;
pub mod cart;
pub mod common;
pub mod products;

use std::sync::Arc;

use crate::coupons::CouponStore;
use crate::db::DbPool;
use crate::events::EventSender;
use crate::services::{
    CartService, CatalogService, CheckoutService, CouponService, SessionService, SessionStore,
};

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services container used by the HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub catalog: Arc<CatalogService>,
    pub cart: Arc<CartService>,
    pub coupons: CouponService,
    pub checkout: Arc<CheckoutService>,
    pub sessions: Arc<SessionService>,
}

impl AppServices {
    /// Builds the service graph, wiring the volatile coupon and session
    /// stores into the services that use them.
    pub fn new(db: Arc<DbPool>, events: EventSender) -> Self {
        let coupon_store = Arc::new(CouponStore::default());
        let session_store = Arc::new(SessionStore::default());
        let coupons = CouponService::new(coupon_store, events.clone());

        Self {
            catalog: Arc::new(CatalogService::new(db.clone(), events.clone())),
            cart: Arc::new(CartService::new(db.clone(), events.clone())),
            checkout: Arc::new(CheckoutService::new(
                db.clone(),
                coupons.clone(),
                events.clone(),
            )),
            sessions: Arc::new(SessionService::new(db, session_store, events)),
            coupons,
        }
    }
}
