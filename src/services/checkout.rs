use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::{cart_item, order, order_item, CartItem, OrderStatus};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::services::coupons::CouponService;
use crate::services::pricing::{self, LineAmounts};

/// Converts a cart into an order record.
#[derive(Clone)]
pub struct CheckoutService {
    db: Arc<DbPool>,
    coupons: CouponService,
    events: EventSender,
}

/// One snapshot line on the receipt.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReceiptItem {
    pub product_id: i32,
    pub name: String,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub qty: i32,
}

/// Denormalized checkout result for receipt display.
#[derive(Debug, Serialize, ToSchema)]
pub struct Receipt {
    pub order_id: Uuid,
    #[schema(value_type = String)]
    pub subtotal: Decimal,
    #[schema(value_type = String)]
    pub discount: Decimal,
    #[schema(value_type = String)]
    pub total: Decimal,
    pub applied_coupon: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub customer_name: String,
    pub customer_email: String,
    pub item_count: i32,
    pub items: Vec<ReceiptItem>,
}

impl CheckoutService {
    pub fn new(db: Arc<DbPool>, coupons: CouponService, events: EventSender) -> Self {
        Self { db, coupons, events }
    }

    /// Runs the checkout sequence for a user's cart.
    ///
    /// Totals are computed from the current cart and applied coupon, then
    /// the order row, its item snapshots, and the cart-row deletion are
    /// committed in one transaction. The coupon association is cleared only
    /// after the commit, so a failed checkout leaves everything untouched.
    #[instrument(skip(self))]
    pub async fn checkout(
        &self,
        user_id: &str,
        name: &str,
        email: &str,
    ) -> Result<Receipt, ServiceError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() {
            return Err(ServiceError::ValidationError(
                "Name and email are required".to_string(),
            ));
        }

        let applied = self.coupons.applied_rule(user_id);

        let txn = self.db.begin().await?;

        let items = CartItem::find()
            .filter(cart_item::Column::UserId.eq(user_id))
            .order_by_desc(cart_item::Column::CreatedAt)
            .all(&txn)
            .await?;
        let products = crate::services::cart::products_by_id(&txn, &items).await?;

        // Lines whose product vanished from the catalog cannot be
        // snapshotted and are excluded, matching the cart view.
        let lines: Vec<_> = items
            .into_iter()
            .filter_map(|item| {
                let product = products.get(&item.product_id).cloned();
                product.map(|p| (item, p))
            })
            .collect();

        if lines.is_empty() {
            return Err(ServiceError::InvalidOperation("Cart is empty".to_string()));
        }

        let amounts: Vec<LineAmounts> = lines.iter().map(|(item, _)| item.into()).collect();
        let totals = pricing::calculate_totals(&amounts, applied);

        let order_id = Uuid::new_v4();
        let created_at = Utc::now();
        let order = order::ActiveModel {
            id: Set(order_id),
            customer_name: Set(name.to_string()),
            customer_email: Set(email.to_string()),
            subtotal: Set(totals.subtotal),
            discount: Set(totals.discount),
            total: Set(totals.total),
            applied_coupon: Set(totals.applied_coupon.clone()),
            status: Set(OrderStatus::Confirmed),
            created_at: Set(created_at),
        };
        order.insert(&txn).await?;

        let mut items = Vec::with_capacity(lines.len());
        for (item, product) in &lines {
            let snapshot = order_item::ActiveModel {
                id: Set(Uuid::new_v4()),
                order_id: Set(order_id),
                product_id: Set(item.product_id),
                name: Set(product.name.clone()),
                price: Set(item.price),
                qty: Set(item.qty),
            };
            snapshot.insert(&txn).await?;
            items.push(ReceiptItem {
                product_id: item.product_id,
                name: product.name.clone(),
                price: item.price,
                qty: item.qty,
            });
        }

        CartItem::delete_many()
            .filter(cart_item::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        self.coupons.remove(user_id).await;
        self.events
            .send_or_log(Event::OrderPlaced {
                order_id,
                total: totals.total,
            })
            .await;

        let item_count = items.iter().map(|i| i.qty).sum();
        info!(
            "checkout complete: order {} for {} ({} items, total {})",
            order_id, user_id, item_count, totals.total
        );

        Ok(Receipt {
            order_id,
            subtotal: totals.subtotal,
            discount: totals.discount,
            total: totals.total,
            applied_coupon: totals.applied_coupon,
            timestamp: created_at,
            customer_name: name.to_string(),
            customer_email: email.to_string(),
            item_count,
            items,
        })
    }
}
