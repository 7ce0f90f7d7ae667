use std::sync::RwLock;

use async_trait::async_trait;

use meister_core::OrderId;
use meister_orders::{Order, OrderReference, PersistedOrder};

use super::{OrderRepository, RepositoryError};

/// In-memory order table.
///
/// Intended for tests/dev. Ids start at 1 like a fresh `BIGSERIAL`.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    rows: RwLock<Vec<PersistedOrder>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.rows.read().map_err(|_| poisoned())?.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }

    /// Snapshot of every stored order in insertion order.
    pub fn all(&self) -> Result<Vec<PersistedOrder>, RepositoryError> {
        Ok(self.rows.read().map_err(|_| poisoned())?.clone())
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Database("order table lock poisoned".to_string())
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, order: &Order) -> Result<OrderId, RepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        let id = OrderId::new(rows.len() as i64 + 1);
        rows.push(PersistedOrder {
            id,
            order: order.clone(),
        });
        Ok(id)
    }

    async fn find_by_reference(
        &self,
        reference: &OrderReference,
    ) -> Result<Option<PersistedOrder>, RepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows
            .iter()
            .rev()
            .find(|row| &row.order.reference == reference)
            .cloned())
    }
}
