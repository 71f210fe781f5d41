//! Orders Bounded Context
//!
//! The durable order record, its lifecycle state machine, and the
//! ownership rules governing who may mutate it.

pub mod aggregate;
pub mod errors;
pub mod events;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::{Order, OrderLineItem, PlaceOrderCommand, ReconstitutedOrderParams};
pub use errors::OrderError;
pub use events::OrderEvent;
pub use repository::OrderRepository;
pub use services::OrderStateMachine;
pub use value_objects::{Actor, ActorRole, OrderStatus, PaymentMethod, ShippingAddress};
