use crate::{
    abstract_trait::{
        DynOrderCommandRepository, DynOrderQueryRepository, DynPaymentGateway, PaymentServiceTrait,
    },
    domain::{
        requests::{CreatePaymentRequest, MarkPaidRecordRequest, VerifyPaymentRequest},
        responses::{ApiResponse, OrderDetailResponse, PaymentIntentResponse},
    },
    errors::ServiceError,
    model::PaymentStatus,
    utils::{Method, Metrics, Status as MetricStatus},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use tokio::time::Instant;
use tracing::{info, warn};

use super::order::load_order_detail;

pub struct PaymentService {
    gateway: DynPaymentGateway,
    query: DynOrderQueryRepository,
    command: DynOrderCommandRepository,
    metrics: Metrics,
}

pub struct PaymentServiceDeps {
    pub gateway: DynPaymentGateway,
    pub query: DynOrderQueryRepository,
    pub command: DynOrderCommandRepository,
}

impl PaymentService {
    pub fn new(deps: PaymentServiceDeps, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();

        registry.register(
            "payment_service_request_counter",
            "Total number of requests to the PaymentService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "payment_service_request_duration",
            "Histogram of request durations for the PaymentService",
            metrics.request_duration.clone(),
        );

        Self {
            gateway: deps.gateway,
            query: deps.query,
            command: deps.command,
            metrics,
        }
    }

    fn observe(&self, started: Instant, ok: bool) {
        let status = if ok {
            MetricStatus::Success
        } else {
            MetricStatus::Error
        };
        self.metrics
            .record(Method::Post, status, started.elapsed().as_secs_f64());
    }

    async fn create_payment_inner(
        &self,
        req: &CreatePaymentRequest,
    ) -> Result<ApiResponse<PaymentIntentResponse>, ServiceError> {
        let order = self
            .query
            .find_by_order_number(&req.order_number)
            .await?
            .ok_or(ServiceError::OrderNotFound)?;

        if order.payment_status == PaymentStatus::Paid {
            return Err(ServiceError::Conflict(format!(
                "payment for order {} already captured",
                order.order_number
            )));
        }

        // The amount comes from the stored order, never from the client.
        let gateway_order = self
            .gateway
            .create_gateway_order(order.total_amount, &order.order_number)
            .await?;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Payment order created successfully".to_string(),
            data: PaymentIntentResponse {
                id: gateway_order.id,
                amount: gateway_order.amount,
                currency: gateway_order.currency,
                key: self.gateway.key_id().to_string(),
            },
        })
    }

    async fn verify_payment_inner(
        &self,
        req: &VerifyPaymentRequest,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError> {
        if !self.gateway.verify_signature(
            &req.razorpay_order_id,
            &req.razorpay_payment_id,
            &req.razorpay_signature,
        ) {
            warn!(
                "🚫 Signature check failed for order {} payment {}",
                req.order_number, req.razorpay_payment_id
            );
            return Err(ServiceError::InvalidSignature);
        }

        let order = self
            .command
            .mark_paid(&MarkPaidRecordRequest {
                order_number: req.order_number.clone(),
                gateway_order_id: req.razorpay_order_id.clone(),
                gateway_payment_id: req.razorpay_payment_id.clone(),
            })
            .await?;

        info!("✅ Payment verified for order {}", order.order_number);

        let detail = load_order_detail(&self.query, order).await?;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Payment verified successfully".to_string(),
            data: detail,
        })
    }
}

#[async_trait]
impl PaymentServiceTrait for PaymentService {
    async fn create_payment(
        &self,
        req: &CreatePaymentRequest,
    ) -> Result<ApiResponse<PaymentIntentResponse>, ServiceError> {
        let started = Instant::now();
        let result = self.create_payment_inner(req).await;
        self.observe(started, result.is_ok());
        result
    }

    async fn verify_payment(
        &self,
        req: &VerifyPaymentRequest,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError> {
        let started = Instant::now();
        let result = self.verify_payment_inner(req).await;
        self.observe(started, result.is_ok());
        result
    }
}
