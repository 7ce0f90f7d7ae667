//! Order intake domain.
//!
//! Boundary parsing/validation of checkout submissions, order references and
//! the order record handed to storage and notifications. Pure domain logic:
//! no IO, no HTTP, no storage.

pub mod error;
pub mod order;
pub mod reference;
pub mod request;

pub use error::OrderError;
pub use order::{Customer, Order, OrderStatus, OrderedProduct, PersistedOrder, ShippingAddress};
pub use reference::OrderReference;
pub use request::OrderRequest;
