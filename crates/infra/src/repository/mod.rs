//! Order storage boundary.
//!
//! The HTTP layer only sees `OrderRepository`; the Postgres adapter is the
//! production implementation and the in-memory one backs tests and local runs.

pub mod in_memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use meister_core::OrderId;
use meister_orders::{Order, OrderError, OrderReference, PersistedOrder};

pub use in_memory::InMemoryOrderRepository;
pub use postgres::PostgresOrderRepository;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The store was unreachable, timed out or refused the statement.
    /// The text is surfaced to the client verbatim.
    #[error("{0}")]
    Database(String),

    /// A stored row could not be turned back into an `Order`.
    #[error("corrupt order row: {0}")]
    Corrupt(String),
}

impl From<RepositoryError> for OrderError {
    fn from(err: RepositoryError) -> Self {
        OrderError::persistence(err.to_string())
    }
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert one order row and return its store-assigned id.
    async fn insert(&self, order: &Order) -> Result<OrderId, RepositoryError>;

    /// Most recently inserted order carrying `reference`, if any.
    async fn find_by_reference(
        &self,
        reference: &OrderReference,
    ) -> Result<Option<PersistedOrder>, RepositoryError>;
}
