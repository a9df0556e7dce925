mod gracefullshutdown;
mod logs;
mod metrics;
mod order_number;

pub use self::gracefullshutdown::shutdown_signal;
pub use self::logs::init_logger;
pub use self::metrics::{Method, Metrics, Status, SystemMetrics, run_metrics_collector};
pub use self::order_number::generate_order_number;
