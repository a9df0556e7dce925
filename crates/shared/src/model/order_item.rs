use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One menu item at order time. The title is a denormalized snapshot so
/// historical orders remain readable if the menu item is later renamed or
/// removed. Rows are created atomically with their order and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    pub order_item_id: i32,
    pub order_id: i32,
    pub title: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub total_price: i64,
    pub created_at: Option<NaiveDateTime>,
}
