mod order;
mod payment;
mod realtime;

pub use self::order::repository::{
    DynOrderCommandRepository, DynOrderQueryRepository, OrderCommandRepositoryTrait,
    OrderQueryRepositoryTrait,
};
pub use self::order::service::{
    DynOrderCommandService, DynOrderQueryService, OrderCommandServiceTrait, OrderQueryServiceTrait,
};
pub use self::payment::{
    DynPaymentGateway, DynPaymentService, PaymentGatewayTrait, PaymentServiceTrait,
};
pub use self::realtime::{DynOrderFeed, OrderFeedTrait};
