mod order;
mod payment;

pub use self::order::{
    CreateAddressRequest, CreateOrderItemRecordRequest, CreateOrderItemRequest,
    CreateOrderRecordRequest, CreateOrderRequest, FindAllOrders, MarkPaidRecordRequest,
    TransitionStatusRecordRequest, TransitionStatusRequest,
};
pub use self::payment::{CreatePaymentRequest, VerifyPaymentRequest};
