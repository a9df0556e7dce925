use crate::model::status::OrderStatus;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Append-only audit record. One entry is created at order creation
/// (PENDING) and exactly one per accepted transition; entries are never
/// edited or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StatusLog {
    pub status_log_id: i32,
    pub order_id: i32,
    pub status: OrderStatus,
    pub note: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}
