//! Cart totals calculation.
//!
//! A pure function over line amounts and the applied coupon rule; callers
//! resolve the rule from the coupon store first, so this module touches no
//! shared state and is testable in isolation.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;
use utoipa::ToSchema;

use crate::coupons::{CouponKind, CouponRule};
use crate::entities::cart_item;

/// The two figures per cart line that pricing cares about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineAmounts {
    pub price: Decimal,
    pub qty: i32,
}

impl From<&cart_item::Model> for LineAmounts {
    fn from(item: &cart_item::Model) -> Self {
        Self {
            price: item.price,
            qty: item.qty,
        }
    }
}

/// Computed totals for a cart, all figures rounded to 2 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CartTotals {
    #[schema(value_type = String)]
    pub subtotal: Decimal,
    #[schema(value_type = String)]
    pub discount: Decimal,
    #[schema(value_type = String)]
    pub total: Decimal,
    /// The applied coupon code, reported even when its discount is inert
    /// below the minimum-order threshold.
    pub applied_coupon: Option<String>,
}

/// Computes `{subtotal, discount, total}` for the given lines.
///
/// A coupon below its minimum-order threshold stays applied but contributes
/// no discount. Shipping-type coupons never contribute a monetary discount.
pub fn calculate_totals(items: &[LineAmounts], applied: Option<&CouponRule>) -> CartTotals {
    let subtotal: Decimal = items
        .iter()
        .map(|line| line.price * Decimal::from(line.qty))
        .sum();
    let subtotal = round2(subtotal);

    let mut discount = Decimal::ZERO;
    if let Some(rule) = applied {
        if subtotal >= rule.min_order {
            discount = match rule.kind {
                CouponKind::Percentage => subtotal * rule.value / dec!(100),
                CouponKind::Fixed => rule.value,
                CouponKind::Shipping => Decimal::ZERO,
            };
        }
    }
    let discount = round2(discount.min(subtotal));
    let total = round2(subtotal - discount);

    CartTotals {
        subtotal,
        discount,
        total,
        applied_coupon: applied.map(|rule| rule.code.to_string()),
    }
}

fn round2(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
