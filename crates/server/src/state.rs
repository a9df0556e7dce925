use crate::di::{DependenciesInject, DependenciesInjectDeps};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynOrderFeed, DynPaymentGateway},
    config::{Config, ConnectionPool},
    payment::RazorpayGateway,
    realtime::OrderFeed,
    utils::{SystemMetrics, run_metrics_collector},
};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    /// Subscribe side of the fan-out, used by the WebSocket transport. The
    /// services hold the same instance behind `DynOrderFeed`.
    pub feed: Arc<OrderFeed>,
    pub registry: Arc<Registry>,
    pub system_metrics: Arc<SystemMetrics>,
    pub allowed_origins: Vec<String>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("feed", &"<OrderFeed>")
            .field("allowed_origins", &self.allowed_origins)
            .finish()
    }
}

impl AppState {
    pub fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        let mut registry = Registry::default();
        let system_metrics = Arc::new(SystemMetrics::new());

        let feed = Arc::new(OrderFeed::new());
        let gateway = Arc::new(RazorpayGateway::new(&config.payment)) as DynPaymentGateway;

        let deps = DependenciesInjectDeps {
            pool,
            feed: feed.clone() as DynOrderFeed,
            gateway,
        };

        let di_container = DependenciesInject::new(deps, &mut registry)
            .context("Failed to initialize dependency injection container")?;

        system_metrics.register(&mut registry);

        tokio::spawn(run_metrics_collector(system_metrics.clone()));

        Ok(Self {
            di_container,
            feed,
            registry: Arc::new(registry),
            system_metrics,
            allowed_origins: config.allowed_origins.clone(),
        })
    }
}
