mod api;
mod order;
mod pagination;
mod payment;

pub use self::api::{ApiResponse, ApiResponsePagination};
pub use self::order::{
    AddressResponse, OrderDetailResponse, OrderItemResponse, OrderResponse, StatusLogResponse,
};
pub use self::pagination::Pagination;
pub use self::payment::{GatewayOrder, PaymentIntentResponse};
