use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Fulfillment status of an order.
///
/// The transition graph is strictly forward-progressing except for
/// cancellation, which is only reachable from the three pre-dispatch
/// states: once food has left the kitchen the order can no longer be
/// cancelled. `DELIVERED` and `CANCELLED` are terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "order_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Preparing,
    ReadyForDispatch,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Accepted,
        OrderStatus::Preparing,
        OrderStatus::ReadyForDispatch,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// The set of statuses this status may legally transition to.
    ///
    /// The match is exhaustive so every status has a defined (possibly
    /// empty) outgoing set; an unrecognized status can never fall through
    /// to "anything allowed".
    pub fn allowed_next(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Accepted, OrderStatus::Cancelled],
            OrderStatus::Accepted => &[OrderStatus::Preparing, OrderStatus::Cancelled],
            OrderStatus::Preparing => &[OrderStatus::ReadyForDispatch, OrderStatus::Cancelled],
            OrderStatus::ReadyForDispatch => &[OrderStatus::OutForDelivery],
            OrderStatus::OutForDelivery => &[OrderStatus::Delivered],
            OrderStatus::Delivered => &[],
            OrderStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        self.allowed_next().contains(&target)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_next().is_empty()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::ReadyForDispatch => "READY_FOR_DISPATCH",
            OrderStatus::OutForDelivery => "OUT_FOR_DELIVERY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "payment_method", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Online,
    Card,
}

/// Payment state is an independent axis from fulfillment status: an order
/// can be PAID while still PENDING, or DELIVERED while unpaid (cash).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "payment_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_may_be_accepted_or_cancelled() {
        assert_eq!(
            OrderStatus::Pending.allowed_next(),
            &[OrderStatus::Accepted, OrderStatus::Cancelled]
        );
    }

    #[test]
    fn cancellation_is_only_reachable_before_dispatch() {
        for status in OrderStatus::ALL {
            let may_cancel = status.can_transition_to(OrderStatus::Cancelled);
            let pre_dispatch = matches!(
                status,
                OrderStatus::Pending | OrderStatus::Accepted | OrderStatus::Preparing
            );
            assert_eq!(may_cancel, pre_dispatch, "cancel from {status}");
        }
    }

    #[test]
    fn delivered_and_cancelled_are_terminal() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        for status in OrderStatus::ALL {
            if !status.is_terminal() {
                assert!(!status.allowed_next().is_empty(), "{status} has no exits");
            }
        }
    }

    #[test]
    fn forward_path_is_linear() {
        let path = [
            OrderStatus::Pending,
            OrderStatus::Accepted,
            OrderStatus::Preparing,
            OrderStatus::ReadyForDispatch,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
        // No skipping ahead.
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Preparing));
        assert!(!OrderStatus::Accepted.can_transition_to(OrderStatus::OutForDelivery));
        // No moving backwards.
        assert!(!OrderStatus::Preparing.can_transition_to(OrderStatus::Accepted));
    }

    #[test]
    fn display_matches_wire_format() {
        assert_eq!(OrderStatus::ReadyForDispatch.to_string(), "READY_FOR_DISPATCH");
        assert_eq!(OrderStatus::OutForDelivery.to_string(), "OUT_FOR_DELIVERY");
    }
}
