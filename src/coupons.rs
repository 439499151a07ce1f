//! Static coupon rule table and the volatile per-user applied-coupon store.
//!
//! The rule set is fixed at compile time; it is not persisted and cannot be
//! edited through the API. The applied-coupon association is process-local
//! state keyed by user id and is lost on restart.

use dashmap::DashMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CouponKind {
    Percentage,
    Fixed,
    /// Shipping-fee waiver; carries no monetary discount in totals.
    Shipping,
}

/// One discount policy. Amounts are INR, like the catalog.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct CouponRule {
    pub code: &'static str,
    pub kind: CouponKind,
    #[schema(value_type = String)]
    pub value: Decimal,
    #[schema(value_type = String)]
    pub min_order: Decimal,
}

pub const COUPONS: &[CouponRule] = &[
    CouponRule {
        code: "FLAT10",
        kind: CouponKind::Percentage,
        value: dec!(10),
        min_order: dec!(1000),
    },
    CouponRule {
        code: "NEWUSER",
        kind: CouponKind::Percentage,
        value: dec!(15),
        min_order: dec!(5000),
    },
    CouponRule {
        code: "SAVE50",
        kind: CouponKind::Fixed,
        value: dec!(500),
        min_order: dec!(10000),
    },
    CouponRule {
        code: "FREESHIP",
        kind: CouponKind::Shipping,
        value: dec!(0),
        min_order: dec!(0),
    },
];

/// Case-insensitive lookup into the static table.
pub fn find(code: &str) -> Option<&'static CouponRule> {
    let code = code.trim().to_uppercase();
    COUPONS.iter().find(|rule| rule.code == code)
}

/// Volatile map of user id to applied coupon code.
///
/// Owned by `AppState` and injected into the services that need it; no
/// module-level mutable state.
#[derive(Debug, Default)]
pub struct CouponStore {
    applied: DashMap<String, String>,
}

impl CouponStore {
    pub fn applied_code(&self, user_id: &str) -> Option<String> {
        self.applied.get(user_id).map(|entry| entry.value().clone())
    }

    /// Associates `code` with the user, replacing any earlier association.
    pub fn apply(&self, user_id: &str, code: &str) {
        self.applied.insert(user_id.to_string(), code.to_string());
    }

    /// Clears the association. Idempotent.
    pub fn clear(&self, user_id: &str) {
        self.applied.remove(user_id);
    }
}
