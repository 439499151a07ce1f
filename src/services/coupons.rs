use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::coupons::{self, CouponRule, CouponStore};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};

/// Coupon application against the static rule table and the volatile
/// per-user store.
#[derive(Clone)]
pub struct CouponService {
    store: Arc<CouponStore>,
    events: EventSender,
}

impl CouponService {
    pub fn new(store: Arc<CouponStore>, events: EventSender) -> Self {
        Self { store, events }
    }

    /// The rule currently applied for the user, if any.
    pub fn applied_rule(&self, user_id: &str) -> Option<&'static CouponRule> {
        self.store
            .applied_code(user_id)
            .and_then(|code| coupons::find(&code))
    }

    /// Validates and applies a coupon code for the user.
    ///
    /// Fails when the code is empty, unknown, or the given cart subtotal is
    /// below the rule's minimum order. On success the association replaces
    /// any earlier one.
    #[instrument(skip(self))]
    pub async fn apply(
        &self,
        user_id: &str,
        code: &str,
        subtotal: Decimal,
    ) -> Result<&'static CouponRule, ServiceError> {
        if code.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "Coupon code is required".to_string(),
            ));
        }

        let rule = coupons::find(code)
            .ok_or_else(|| ServiceError::ValidationError("Invalid coupon code".to_string()))?;

        if subtotal < rule.min_order {
            return Err(ServiceError::ValidationError(format!(
                "Minimum order value of ₹{} required for this coupon",
                rule.min_order
            )));
        }

        self.store.apply(user_id, rule.code);
        self.events
            .send_or_log(Event::CouponApplied {
                user_id: user_id.to_string(),
                code: rule.code.to_string(),
            })
            .await;

        info!("applied coupon {} for {}", rule.code, user_id);
        Ok(rule)
    }

    /// Clears the user's coupon association. Idempotent; removing when
    /// nothing is applied is not an error.
    #[instrument(skip(self))]
    pub async fn remove(&self, user_id: &str) {
        self.store.clear(user_id);
        self.events
            .send_or_log(Event::CouponRemoved {
                user_id: user_id.to_string(),
            })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tokio::sync::mpsc;

    fn service() -> CouponService {
        let (tx, _rx) = mpsc::channel(8);
        CouponService::new(Arc::new(CouponStore::default()), EventSender::new(tx))
    }

    #[tokio::test]
    async fn apply_validates_the_code() {
        let svc = service();
        assert!(svc.apply("u1", "", dec!(5000)).await.is_err());
        assert!(svc.apply("u1", "BOGUS", dec!(5000)).await.is_err());
        assert!(svc.applied_rule("u1").is_none());
    }

    #[tokio::test]
    async fn apply_enforces_minimum_order() {
        let svc = service();
        let err = svc.apply("u1", "SAVE50", dec!(9999.99)).await.unwrap_err();
        assert!(err.to_string().contains("Minimum order value"));
        assert!(svc.applied_rule("u1").is_none());

        let rule = svc.apply("u1", "save50", dec!(10000)).await.unwrap();
        assert_eq!(rule.code, "SAVE50");
        assert_eq!(svc.applied_rule("u1").map(|r| r.code), Some("SAVE50"));
    }

    #[tokio::test]
    async fn apply_overwrites_and_remove_is_idempotent() {
        let svc = service();
        svc.apply("u1", "FLAT10", dec!(2000)).await.unwrap();
        svc.apply("u1", "FREESHIP", dec!(2000)).await.unwrap();
        assert_eq!(svc.applied_rule("u1").map(|r| r.code), Some("FREESHIP"));

        svc.remove("u1").await;
        svc.remove("u1").await;
        assert!(svc.applied_rule("u1").is_none());
    }
}
