use crate::domain::responses::OrderDetailResponse;
use serde::{Deserialize, Serialize};

/// Server-pushed realtime events. The wire names (`order-update`,
/// `new-order`) are part of the client protocol.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "order", rename_all = "kebab-case")]
pub enum OrderFeedEvent {
    OrderUpdate(OrderDetailResponse),
    NewOrder(OrderDetailResponse),
}

impl OrderFeedEvent {
    pub fn order_number(&self) -> &str {
        match self {
            OrderFeedEvent::OrderUpdate(order) | OrderFeedEvent::NewOrder(order) => {
                &order.order_number
            }
        }
    }
}

/// Client commands on the realtime socket (`join-order`, `leave-order`,
/// `join-admin`).
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum FeedCommand {
    JoinOrder { order_number: String },
    LeaveOrder { order_number: String },
    JoinAdmin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_use_kebab_case_actions() {
        let cmd: FeedCommand =
            serde_json::from_str(r#"{"action":"join-order","order_number":"JF123456ABCD"}"#)
                .unwrap();
        assert!(matches!(cmd, FeedCommand::JoinOrder { order_number } if order_number == "JF123456ABCD"));

        let cmd: FeedCommand = serde_json::from_str(r#"{"action":"join-admin"}"#).unwrap();
        assert!(matches!(cmd, FeedCommand::JoinAdmin));
    }
}
