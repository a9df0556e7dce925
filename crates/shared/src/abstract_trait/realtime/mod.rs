use crate::domain::responses::OrderDetailResponse;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynOrderFeed = Arc<dyn OrderFeedTrait + Send + Sync>;

/// Publish side of the notification fan-out. Delivery is best-effort and
/// fire-and-forget; a failed or missing subscriber never surfaces to the
/// caller.
#[async_trait]
pub trait OrderFeedTrait {
    /// Delivers the snapshot to the order's own channel and to the
    /// administrative channel.
    async fn publish_status_change(&self, order: &OrderDetailResponse);

    /// Delivers the snapshot to the administrative channel only.
    async fn publish_new_order(&self, order: &OrderDetailResponse);
}
