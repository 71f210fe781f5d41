//! Order Aggregate

mod line_item;
mod order;

pub use line_item::OrderLineItem;
pub use order::{Order, PlaceOrderCommand, ReconstitutedOrderParams};
