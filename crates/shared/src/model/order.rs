use crate::model::status::{OrderStatus, PaymentMethod, PaymentStatus};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub order_id: i32,
    pub order_number: String,
    pub user_id: Option<i32>,
    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
    pub address_id: i32,
    pub total_amount: i64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub gateway_order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub status: OrderStatus,
    pub created_at: Option<NaiveDateTime>,
}
