use crate::model::{
    Address, Order, OrderItem, OrderStatus, PaymentMethod, PaymentStatus, StatusLog,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderResponse {
    pub id: i32,
    pub order_number: String,
    pub user_id: Option<i32>,
    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
    pub total_amount: i64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    #[serde(rename = "created_at")]
    pub created_at: Option<String>,
}

// model to response
impl From<Order> for OrderResponse {
    fn from(value: Order) -> Self {
        OrderResponse {
            id: value.order_id,
            order_number: value.order_number,
            user_id: value.user_id,
            guest_name: value.guest_name,
            guest_phone: value.guest_phone,
            total_amount: value.total_amount,
            payment_method: value.payment_method,
            payment_status: value.payment_status,
            status: value.status,
            created_at: value.created_at.map(|dt| dt.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderItemResponse {
    pub id: i32,
    pub title: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub total_price: i64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(value: OrderItem) -> Self {
        OrderItemResponse {
            id: value.order_item_id,
            title: value.title,
            quantity: value.quantity,
            unit_price: value.unit_price,
            total_price: value.total_price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct StatusLogResponse {
    pub id: i32,
    pub status: OrderStatus,
    pub note: Option<String>,
    #[serde(rename = "created_at")]
    pub created_at: Option<String>,
}

impl From<StatusLog> for StatusLogResponse {
    fn from(value: StatusLog) -> Self {
        StatusLogResponse {
            id: value.status_log_id,
            status: value.status,
            note: value.note,
            created_at: value.created_at.map(|dt| dt.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct AddressResponse {
    pub id: i32,
    pub label: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub phone: String,
}

impl From<Address> for AddressResponse {
    fn from(value: Address) -> Self {
        AddressResponse {
            id: value.address_id,
            label: value.label,
            line1: value.line1,
            line2: value.line2,
            city: value.city,
            state: value.state,
            pincode: value.pincode,
            phone: value.phone,
        }
    }
}

/// Full order snapshot: the shape pushed over the realtime channel and
/// returned by the tracking endpoint. Status logs are most-recent first.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderDetailResponse {
    pub id: i32,
    pub order_number: String,
    pub user_id: Option<i32>,
    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
    pub address: AddressResponse,
    pub items: Vec<OrderItemResponse>,
    pub total_amount: i64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub gateway_order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub status: OrderStatus,
    pub status_logs: Vec<StatusLogResponse>,
    #[serde(rename = "created_at")]
    pub created_at: Option<String>,
}

impl OrderDetailResponse {
    pub fn assemble(
        order: Order,
        address: Address,
        items: Vec<OrderItem>,
        logs: Vec<StatusLog>,
    ) -> Self {
        OrderDetailResponse {
            id: order.order_id,
            order_number: order.order_number,
            user_id: order.user_id,
            guest_name: order.guest_name,
            guest_phone: order.guest_phone,
            address: address.into(),
            items: items.into_iter().map(OrderItemResponse::from).collect(),
            total_amount: order.total_amount,
            payment_method: order.payment_method,
            payment_status: order.payment_status,
            gateway_order_id: order.gateway_order_id,
            gateway_payment_id: order.gateway_payment_id,
            status: order.status,
            status_logs: logs.into_iter().map(StatusLogResponse::from).collect(),
            created_at: order.created_at.map(|dt| dt.to_string()),
        }
    }
}
