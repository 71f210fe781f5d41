//! Orders Value Objects

mod actor;
mod order_status;
mod payment_method;
mod shipping_address;

pub use actor::{Actor, ActorRole};
pub use order_status::OrderStatus;
pub use payment_method::PaymentMethod;
pub use shipping_address::ShippingAddress;
