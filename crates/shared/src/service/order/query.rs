use crate::{
    abstract_trait::{DynOrderQueryRepository, OrderQueryServiceTrait},
    domain::{
        requests::FindAllOrders,
        responses::{
            ApiResponse, ApiResponsePagination, OrderDetailResponse, OrderResponse, Pagination,
        },
    },
    errors::ServiceError,
    utils::{Method, Metrics, Status as MetricStatus},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use tokio::time::Instant;
use tracing::info;

use super::load_order_detail;

pub struct OrderQueryService {
    query: DynOrderQueryRepository,
    metrics: Metrics,
}

impl OrderQueryService {
    pub fn new(query: DynOrderQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();

        registry.register(
            "order_query_service_request_counter",
            "Total number of requests to the OrderQueryService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "order_query_service_request_duration",
            "Histogram of request durations for the OrderQueryService",
            metrics.request_duration.clone(),
        );

        Self { query, metrics }
    }

    fn observe(&self, started: Instant, ok: bool) {
        let status = if ok {
            MetricStatus::Success
        } else {
            MetricStatus::Error
        };
        self.metrics
            .record(Method::Get, status, started.elapsed().as_secs_f64());
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        let started = Instant::now();

        let result = self.query.find_all(req).await;
        self.observe(started, result.is_ok());

        let (orders, total_items) = result.map_err(ServiceError::from)?;

        let total_pages = if req.page_size > 0 {
            ((total_items as f64) / (req.page_size as f64)).ceil() as i32
        } else {
            0
        };

        Ok(ApiResponsePagination {
            status: "success".to_string(),
            message: "Orders retrieved successfully".to_string(),
            data: orders.into_iter().map(OrderResponse::from).collect(),
            pagination: Pagination {
                page: req.page,
                page_size: req.page_size,
                total_items: total_items as i32,
                total_pages,
            },
        })
    }

    /// The ground-truth read used by tracking clients to resync after
    /// (re)connecting; the event stream alone is never authoritative for
    /// initial state.
    async fn find_by_order_number(
        &self,
        order_number: &str,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError> {
        let started = Instant::now();

        info!("🔍 Fetching order {order_number}");

        let result = async {
            let order = self
                .query
                .find_by_order_number(order_number)
                .await?
                .ok_or(ServiceError::OrderNotFound)?;

            load_order_detail(&self.query, order).await
        }
        .await;

        self.observe(started, result.is_ok());

        let detail = result?;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Order retrieved successfully".to_string(),
            data: detail,
        })
    }
}
