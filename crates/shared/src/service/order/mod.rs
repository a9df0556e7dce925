mod command;
mod query;

pub use self::command::{OrderCommandService, OrderCommandServiceDeps};
pub use self::query::OrderQueryService;

use crate::{
    abstract_trait::DynOrderQueryRepository, domain::responses::OrderDetailResponse,
    errors::ServiceError, model::Order,
};

/// Loads the full snapshot (address, items, status log) for an already
/// fetched order row. Shared by both sides of the order service.
pub(crate) async fn load_order_detail(
    query: &DynOrderQueryRepository,
    order: Order,
) -> Result<OrderDetailResponse, ServiceError> {
    let address = query.find_address(order.address_id).await?;
    let items = query.find_items(order.order_id).await?;
    let logs = query.find_status_logs(order.order_id).await?;

    Ok(OrderDetailResponse::assemble(order, address, items, logs))
}
