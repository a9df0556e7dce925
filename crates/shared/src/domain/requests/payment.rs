use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentRequest {
    #[validate(length(min = 1, message = "Order number is required"))]
    pub order_number: String,
}

/// Field names follow the gateway checkout callback payload verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct VerifyPaymentRequest {
    #[validate(length(min = 1, message = "Order number is required"))]
    pub order_number: String,

    #[validate(length(min = 1, message = "Gateway order id is required"))]
    pub razorpay_order_id: String,

    #[validate(length(min = 1, message = "Gateway payment id is required"))]
    pub razorpay_payment_id: String,

    #[validate(length(min = 1, message = "Signature is required"))]
    pub razorpay_signature: String,
}
