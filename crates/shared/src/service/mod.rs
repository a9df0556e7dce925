mod order;
mod payment;

pub use self::order::{OrderCommandService, OrderCommandServiceDeps, OrderQueryService};
pub use self::payment::{PaymentService, PaymentServiceDeps};
