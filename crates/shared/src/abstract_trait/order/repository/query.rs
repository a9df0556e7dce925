use crate::{
    domain::requests::FindAllOrders,
    errors::RepositoryError,
    model::{Address, Order as OrderModel, OrderItem, StatusLog},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryRepositoryTrait {
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<(Vec<OrderModel>, i64), RepositoryError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError>;

    async fn find_by_order_number(
        &self,
        order_number: &str,
    ) -> Result<Option<OrderModel>, RepositoryError>;

    async fn find_items(&self, order_id: i32) -> Result<Vec<OrderItem>, RepositoryError>;

    /// Status-log history, most recent first.
    async fn find_status_logs(&self, order_id: i32) -> Result<Vec<StatusLog>, RepositoryError>;

    async fn find_address(&self, address_id: i32) -> Result<Address, RepositoryError>;
}
