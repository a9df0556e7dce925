use crate::model::{OrderStatus, PaymentMethod};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllOrders {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,

    /// Matched against the order number.
    #[serde(default)]
    pub search: String,

    #[serde(default)]
    pub status: Option<OrderStatus>,
}

fn default_page() -> i32 {
    1
}

fn default_page_size() -> i32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderItemRequest {
    #[validate(length(min = 1, message = "Item title is required"))]
    pub title: String,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    #[schema(example = 2)]
    pub quantity: i32,

    #[validate(range(min = 1, message = "Unit price must be positive"))]
    #[schema(example = 250)]
    pub unit_price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAddressRequest {
    pub label: Option<String>,

    #[validate(length(min = 1, message = "Address line 1 is required"))]
    pub line1: String,

    pub line2: Option<String>,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,

    #[validate(length(min = 1, message = "Pincode is required"))]
    pub pincode: String,

    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone: String,
}

/// Body of the public order-creation endpoint. Exactly one of `user_id`
/// and the guest identity pair must be supplied; the service rejects
/// anything else.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "Items are required"), nested)]
    pub items: Vec<CreateOrderItemRequest>,

    #[validate(nested)]
    pub address: CreateAddressRequest,

    pub user_id: Option<i32>,

    pub guest_name: Option<String>,

    pub guest_phone: Option<String>,

    #[serde(default)]
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct TransitionStatusRequest {
    pub status: OrderStatus,

    pub note: Option<String>,
}

// Repository-level records, produced by the service after validation.

#[derive(Debug, Clone)]
pub struct CreateOrderItemRecordRequest {
    pub title: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub total_price: i64,
}

#[derive(Debug, Clone)]
pub struct CreateOrderRecordRequest {
    pub order_number: String,
    pub user_id: Option<i32>,
    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
    pub address: CreateAddressRequest,
    pub total_amount: i64,
    pub payment_method: PaymentMethod,
    pub items: Vec<CreateOrderItemRecordRequest>,
}

#[derive(Debug, Clone)]
pub struct TransitionStatusRecordRequest {
    pub order_id: i32,
    pub status: OrderStatus,
    pub note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MarkPaidRecordRequest {
    pub order_number: String,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
}
