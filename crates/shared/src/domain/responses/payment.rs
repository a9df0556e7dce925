use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Order handle returned by the payment gateway's create-order call.
/// `amount` is in the gateway's minor unit.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
}

/// What the checkout widget needs to open: the gateway order handle plus
/// the public key id.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct PaymentIntentResponse {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub key: String,
}
