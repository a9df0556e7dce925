use anyhow::Result;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{
        DynOrderCommandService, DynOrderFeed, DynOrderQueryService, DynPaymentGateway,
        DynPaymentService,
    },
    config::ConnectionPool,
    repository::OrderRepository,
    service::{
        OrderCommandService, OrderCommandServiceDeps, OrderQueryService, PaymentService,
        PaymentServiceDeps,
    },
};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub order_command: DynOrderCommandService,
    pub order_query: DynOrderQueryService,
    pub payment: DynPaymentService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("order_command", &"<OrderCommandService>")
            .field("order_query", &"<OrderQueryService>")
            .field("payment", &"<PaymentService>")
            .finish()
    }
}

pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub feed: DynOrderFeed,
    pub gateway: DynPaymentGateway,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Result<Self> {
        let DependenciesInjectDeps {
            pool,
            feed,
            gateway,
        } = deps;

        let order_repository = OrderRepository::new(pool.clone());

        let order_command = Arc::new(OrderCommandService::new(
            OrderCommandServiceDeps {
                command: order_repository.command.clone(),
                query: order_repository.query.clone(),
                feed,
            },
            registry,
        )) as DynOrderCommandService;

        let order_query = Arc::new(OrderQueryService::new(
            order_repository.query.clone(),
            registry,
        )) as DynOrderQueryService;

        let payment = Arc::new(PaymentService::new(
            PaymentServiceDeps {
                gateway,
                query: order_repository.query.clone(),
                command: order_repository.command.clone(),
            },
            registry,
        )) as DynPaymentService;

        Ok(Self {
            order_command,
            order_query,
            payment,
        })
    }
}
