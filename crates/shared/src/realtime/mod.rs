use crate::{
    abstract_trait::OrderFeedTrait, domain::event::OrderFeedEvent,
    domain::responses::OrderDetailResponse,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, info};

const CHANNEL_CAPACITY: usize = 64;

/// Channel registry for the realtime order feed: one lazily-created room
/// per order number plus a single administrative room. Constructed once per
/// process and handed to both the status engine (publish side) and the
/// socket transport (subscribe side); there is no global state.
///
/// Unsubscribing is dropping the receiver. Delivery is fire-and-forget: a
/// slow receiver lags and drops events, a reconnecting client must refetch
/// current state over the query API.
pub struct OrderFeed {
    admin: broadcast::Sender<OrderFeedEvent>,
    rooms: RwLock<HashMap<String, broadcast::Sender<OrderFeedEvent>>>,
}

impl Default for OrderFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderFeed {
    pub fn new() -> Self {
        let (admin, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            admin,
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Joins the room for one order number, creating it if necessary.
    /// The order number alone is the capability token; no ownership check.
    pub async fn subscribe(&self, order_number: &str) -> broadcast::Receiver<OrderFeedEvent> {
        let mut rooms = self.rooms.write().await;
        rooms
            .entry(order_number.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    pub fn subscribe_admin(&self) -> broadcast::Receiver<OrderFeedEvent> {
        self.admin.subscribe()
    }

    async fn send_to_room(&self, order_number: &str, event: &OrderFeedEvent) {
        let mut rooms = self.rooms.write().await;
        let Some(tx) = rooms.get(order_number) else {
            debug!("📭 No room for order {order_number}, skipping");
            return;
        };

        if tx.receiver_count() == 0 {
            // Last subscriber left; reclaim the room.
            rooms.remove(order_number);
            return;
        }

        let _ = tx.send(event.clone());
    }

    fn send_to_admin(&self, event: OrderFeedEvent) {
        if self.admin.receiver_count() > 0 {
            let _ = self.admin.send(event);
        }
    }
}

#[async_trait]
impl OrderFeedTrait for OrderFeed {
    async fn publish_status_change(&self, order: &OrderDetailResponse) {
        let event = OrderFeedEvent::OrderUpdate(order.clone());

        self.send_to_room(&order.order_number, &event).await;
        self.send_to_admin(event);

        info!(
            "📡 Published order-update for {} ({})",
            order.order_number, order.status
        );
    }

    async fn publish_new_order(&self, order: &OrderDetailResponse) {
        self.send_to_admin(OrderFeedEvent::NewOrder(order.clone()));

        info!("📡 Published new-order for {}", order.order_number);
    }
}
