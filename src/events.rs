//! Domain events, published best-effort over an in-process channel and
//! drained by a logging consumer task.

use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub enum Event {
    CatalogSeeded { count: usize },
    CartItemAdded { user_id: String, product_id: i32, qty: i32 },
    CartItemUpdated { user_id: String, item_id: Uuid, qty: i32 },
    CartItemRemoved { user_id: String, item_id: Uuid },
    CouponApplied { user_id: String, code: String },
    CouponRemoved { user_id: String },
    OrderPlaced { order_id: Uuid, total: Decimal },
    UserRegistered { user_id: Uuid, is_guest: bool },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event, logging instead of failing when the consumer is gone.
    /// Event delivery is never allowed to fail a request.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(err) = self.sender.send(event).await {
            warn!("failed to publish event: {}", err);
        }
    }
}

/// Consumer loop; currently events are only logged.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    while let Some(event) = receiver.recv().await {
        info!(event = ?event, "domain event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_or_log_survives_closed_channel() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sender = EventSender::new(tx);
        sender
            .send_or_log(Event::CouponRemoved { user_id: "demo-user".into() })
            .await;
    }

    #[tokio::test]
    async fn events_reach_the_consumer() {
        let (tx, mut rx) = mpsc::channel(8);
        let sender = EventSender::new(tx);
        sender.send_or_log(Event::CatalogSeeded { count: 12 }).await;
        match rx.recv().await {
            Some(Event::CatalogSeeded { count }) => assert_eq!(count, 12),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
