use crate::{
    domain::requests::{
        CreateOrderRecordRequest, MarkPaidRecordRequest, TransitionStatusRecordRequest,
    },
    errors::RepositoryError,
    model::Order as OrderModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

/// Write side of the order store. The order row, its items and its status
/// log are owned exclusively by this repository; nothing else writes them.
#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Creates the order, its line items and the initial PENDING status-log
    /// entry as one atomic unit.
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<OrderModel, RepositoryError>;

    /// Check-then-write under a row lock: reads the current status, rejects
    /// with `InvalidTransition` if the flow table forbids the move, else
    /// updates the status and appends a log entry in the same transaction.
    async fn transition_status(
        &self,
        req: &TransitionStatusRecordRequest,
    ) -> Result<OrderModel, RepositoryError>;

    /// Writes the payment-confirmation fields once. Rejects with `Conflict`
    /// when the payment has already been captured.
    async fn mark_paid(&self, req: &MarkPaidRecordRequest) -> Result<OrderModel, RepositoryError>;
}
