use crate::{
    domain::{
        requests::{CreatePaymentRequest, VerifyPaymentRequest},
        responses::{ApiResponse, GatewayOrder, OrderDetailResponse, PaymentIntentResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynPaymentGateway = Arc<dyn PaymentGatewayTrait + Send + Sync>;
pub type DynPaymentService = Arc<dyn PaymentServiceTrait + Send + Sync>;

/// Thin boundary over the external payment collaborator: one call to open
/// a gateway order, one pure check of the checkout signature.
#[async_trait]
pub trait PaymentGatewayTrait {
    async fn create_gateway_order(
        &self,
        amount: i64,
        receipt: &str,
    ) -> Result<GatewayOrder, ServiceError>;

    /// Constant-time HMAC comparison; never errors, only yes/no.
    fn verify_signature(&self, gateway_order_id: &str, payment_id: &str, signature: &str) -> bool;

    fn key_id(&self) -> &str;
}

#[async_trait]
pub trait PaymentServiceTrait {
    async fn create_payment(
        &self,
        req: &CreatePaymentRequest,
    ) -> Result<ApiResponse<PaymentIntentResponse>, ServiceError>;

    async fn verify_payment(
        &self,
        req: &VerifyPaymentRequest,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError>;
}
