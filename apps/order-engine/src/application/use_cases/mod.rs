//! Application Use Cases
//!
//! One struct per operation, generic over the ports each needs.

mod advance_order_status;
mod list_orders;
mod notification_inbox;
mod notify_order_placed;
mod place_order;

pub use advance_order_status::AdvanceOrderStatusUseCase;
pub use list_orders::ListOrdersUseCase;
pub use notification_inbox::NotificationInboxUseCase;
pub use notify_order_placed::{InProcessSideEffects, NotifyOrderPlacedUseCase};
pub use place_order::{CheckoutError, PlaceOrderUseCase};
