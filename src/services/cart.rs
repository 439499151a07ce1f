use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::{cart_item, CartItem, CartItemModel, Product};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};

/// Cart line item mutations and views, scoped by plaintext user id.
#[derive(Clone)]
pub struct CartService {
    db: Arc<DbPool>,
    events: EventSender,
}

/// One cart line joined with its product, as rendered to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CartLine {
    pub id: Uuid,
    pub product_id: i32,
    pub product_name: String,
    pub product_image: String,
    pub qty: i32,
    #[schema(value_type = String)]
    pub price: Decimal,
}

impl CartService {
    pub fn new(db: Arc<DbPool>, events: EventSender) -> Self {
        Self { db, events }
    }

    /// Adds a product to the user's cart, capturing the current catalog
    /// price. A repeat add for the same product increments the existing
    /// line instead of creating a second one.
    ///
    /// Returns the resulting line and whether it was newly created.
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        user_id: &str,
        product_id: i32,
        qty: i32,
    ) -> Result<(CartItemModel, bool), ServiceError> {
        if qty < 1 {
            return Err(ServiceError::ValidationError(
                "Quantity must be greater than 0".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        let product = Product::find_by_id(product_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Product not found".to_string()))?;

        let existing = CartItem::find()
            .filter(cart_item::Column::UserId.eq(user_id))
            .filter(cart_item::Column::ProductId.eq(product_id))
            .one(&txn)
            .await?;

        let (item, created) = match existing {
            Some(item) => {
                let merged_qty = item.qty + qty;
                let mut active: cart_item::ActiveModel = item.into();
                active.qty = Set(merged_qty);
                (active.update(&txn).await?, false)
            }
            None => {
                let item = cart_item::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(user_id.to_string()),
                    product_id: Set(product_id),
                    qty: Set(qty),
                    price: Set(product.price),
                    created_at: Set(Utc::now()),
                };
                (item.insert(&txn).await?, true)
            }
        };

        txn.commit().await?;

        self.events
            .send_or_log(Event::CartItemAdded {
                user_id: user_id.to_string(),
                product_id,
                qty,
            })
            .await;

        info!(
            "added product {} x{} to cart of {}",
            product_id, qty, user_id
        );
        Ok((item, created))
    }

    /// Replaces the quantity of a cart line in place.
    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        user_id: &str,
        item_id: Uuid,
        qty: i32,
    ) -> Result<CartItemModel, ServiceError> {
        if qty < 1 {
            return Err(ServiceError::ValidationError(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let item = CartItem::find_by_id(item_id)
            .filter(cart_item::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Cart item not found".to_string()))?;

        let mut active: cart_item::ActiveModel = item.into();
        active.qty = Set(qty);
        let updated = active.update(&*self.db).await?;

        self.events
            .send_or_log(Event::CartItemUpdated {
                user_id: user_id.to_string(),
                item_id,
                qty,
            })
            .await;

        Ok(updated)
    }

    /// Deletes a cart line by id, scoped to the user. Returns the removed
    /// line.
    #[instrument(skip(self))]
    pub async fn remove_item(
        &self,
        user_id: &str,
        item_id: Uuid,
    ) -> Result<CartItemModel, ServiceError> {
        let item = CartItem::find_by_id(item_id)
            .filter(cart_item::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Cart item not found".to_string()))?;

        let removed = item.clone();
        item.delete(&*self.db).await?;

        self.events
            .send_or_log(Event::CartItemRemoved {
                user_id: user_id.to_string(),
                item_id,
            })
            .await;

        Ok(removed)
    }

    /// Raw cart lines for a user, used for subtotal checks.
    pub async fn items(&self, user_id: &str) -> Result<Vec<CartItemModel>, ServiceError> {
        Ok(CartItem::find()
            .filter(cart_item::Column::UserId.eq(user_id))
            .all(&*self.db)
            .await?)
    }

    /// Cart lines joined with their products, newest first. Lines whose
    /// product has since been removed from the catalog are skipped.
    #[instrument(skip(self))]
    pub async fn view(&self, user_id: &str) -> Result<Vec<CartLine>, ServiceError> {
        let items = CartItem::find()
            .filter(cart_item::Column::UserId.eq(user_id))
            .order_by_desc(cart_item::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        let products = products_by_id(&*self.db, &items).await?;

        Ok(items
            .into_iter()
            .filter_map(|item| {
                products.get(&item.product_id).map(|product| CartLine {
                    id: item.id,
                    product_id: item.product_id,
                    product_name: product.name.clone(),
                    product_image: product.image.clone(),
                    qty: item.qty,
                    price: item.price,
                })
            })
            .collect())
    }
}

/// Looks up the products referenced by the given cart lines, keyed by id.
/// Missing ids are simply absent from the map.
pub(crate) async fn products_by_id(
    conn: &impl sea_orm::ConnectionTrait,
    items: &[CartItemModel],
) -> Result<std::collections::HashMap<i32, crate::entities::ProductModel>, ServiceError> {
    if items.is_empty() {
        return Ok(std::collections::HashMap::new());
    }
    let ids: Vec<i32> = items.iter().map(|item| item.product_id).collect();
    let products = Product::find()
        .filter(crate::entities::product::Column::Id.is_in(ids))
        .all(conn)
        .await?;
    Ok(products.into_iter().map(|p| (p.id, p)).collect())
}
