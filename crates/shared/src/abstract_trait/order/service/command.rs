use crate::{
    domain::{
        requests::{CreateOrderRequest, TransitionStatusRequest},
        responses::{ApiResponse, OrderDetailResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynOrderCommandService = Arc<dyn OrderCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandServiceTrait {
    async fn create_order(
        &self,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError>;

    async fn transition_status(
        &self,
        order_id: i32,
        req: &TransitionStatusRequest,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError>;
}
