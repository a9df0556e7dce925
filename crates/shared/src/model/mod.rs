mod address;
mod order;
mod order_item;
mod status;
mod status_log;

pub use self::address::Address;
pub use self::order::Order;
pub use self::order_item::OrderItem;
pub use self::status::{OrderStatus, PaymentMethod, PaymentStatus};
pub use self::status_log::StatusLog;
