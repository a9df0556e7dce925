use crate::{
    abstract_trait::{
        DynOrderCommandRepository, DynOrderFeed, DynOrderQueryRepository, OrderCommandServiceTrait,
    },
    domain::{
        requests::{
            CreateOrderItemRecordRequest, CreateOrderRecordRequest, CreateOrderRequest,
            TransitionStatusRecordRequest, TransitionStatusRequest,
        },
        responses::{ApiResponse, OrderDetailResponse},
    },
    errors::ServiceError,
    utils::{Method, Metrics, Status as MetricStatus, generate_order_number},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use tokio::time::Instant;
use tracing::{error, info};

use super::load_order_detail;

/// The single authority for mutating an order. Everything durable happens
/// in one repository transaction; the fan-out hand-off only runs after the
/// commit and can never roll it back.
pub struct OrderCommandService {
    command: DynOrderCommandRepository,
    query: DynOrderQueryRepository,
    feed: DynOrderFeed,
    metrics: Metrics,
}

pub struct OrderCommandServiceDeps {
    pub command: DynOrderCommandRepository,
    pub query: DynOrderQueryRepository,
    pub feed: DynOrderFeed,
}

impl OrderCommandService {
    pub fn new(deps: OrderCommandServiceDeps, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();

        registry.register(
            "order_command_service_request_counter",
            "Total number of requests to the OrderCommandService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "order_command_service_request_duration",
            "Histogram of request durations for the OrderCommandService",
            metrics.request_duration.clone(),
        );

        Self {
            command: deps.command,
            query: deps.query,
            feed: deps.feed,
            metrics,
        }
    }

    fn observe(&self, method: Method, started: Instant, ok: bool) {
        let status = if ok {
            MetricStatus::Success
        } else {
            MetricStatus::Error
        };
        self.metrics
            .record(method, status, started.elapsed().as_secs_f64());
    }

    async fn create_order_inner(
        &self,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError> {
        if req.items.is_empty() {
            return Err(ServiceError::Validation(vec!["Items are required".into()]));
        }

        // Exactly one of user id / guest identity. A logged-in order drops
        // any stray guest fields; a guest order requires both.
        let (user_id, guest_name, guest_phone) = if let Some(user_id) = req.user_id {
            (Some(user_id), None, None)
        } else {
            let name = req.guest_name.clone().filter(|s| !s.trim().is_empty());
            let phone = req.guest_phone.clone().filter(|s| !s.trim().is_empty());
            match (name, phone) {
                (Some(name), Some(phone)) => (None, Some(name), Some(phone)),
                _ => {
                    return Err(ServiceError::Validation(vec![
                        "Guest orders require guest_name and guest_phone".into(),
                    ]));
                }
            }
        };

        let mut total_amount: i64 = 0;
        let mut items = Vec::with_capacity(req.items.len());

        for item in &req.items {
            let total_price = i64::from(item.quantity) * item.unit_price;
            total_amount += total_price;

            items.push(CreateOrderItemRecordRequest {
                title: item.title.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                total_price,
            });
        }

        let order_number =
            generate_order_number().map_err(|e| ServiceError::Internal(e.to_string()))?;

        info!(
            "🏗️ Creating order {} with {} item(s), total {}",
            order_number,
            items.len(),
            total_amount
        );

        let order = self
            .command
            .create_order(&CreateOrderRecordRequest {
                order_number,
                user_id,
                guest_name,
                guest_phone,
                address: req.address.clone(),
                total_amount,
                payment_method: req.payment_method,
                items,
            })
            .await?;

        let detail = load_order_detail(&self.query, order).await?;

        // Routed to the admin channel only; the customer cannot have
        // subscribed to an order number that did not exist yet.
        self.feed.publish_new_order(&detail).await;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Order created successfully".to_string(),
            data: detail,
        })
    }

    async fn transition_status_inner(
        &self,
        order_id: i32,
        req: &TransitionStatusRequest,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError> {
        info!("🔄 Requesting transition of order {order_id} to {}", req.status);

        let order = self
            .command
            .transition_status(&TransitionStatusRecordRequest {
                order_id,
                status: req.status,
                note: req.note.clone(),
            })
            .await
            .map_err(|err| {
                error!("❌ Transition failed for order {order_id}: {err}");
                ServiceError::from(err)
            })?;

        let detail = load_order_detail(&self.query, order).await?;

        self.feed.publish_status_change(&detail).await;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Order status updated successfully".to_string(),
            data: detail,
        })
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn create_order(
        &self,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError> {
        let started = Instant::now();
        let result = self.create_order_inner(req).await;
        self.observe(Method::Post, started, result.is_ok());
        result
    }

    async fn transition_status(
        &self,
        order_id: i32,
        req: &TransitionStatusRequest,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError> {
        let started = Instant::now();
        let result = self.transition_status_inner(order_id, req).await;
        self.observe(Method::Patch, started, result.is_ok());
        result
    }
}
