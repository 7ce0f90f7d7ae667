use chrono::{DateTime, SubsecRound, Utc};

use meister_core::{Entity, OrderId, Price, ProductId};

use crate::reference::OrderReference;
use crate::request::OrderRequest;

/// Who placed the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Delivery address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingAddress {
    pub street: String,
    pub house_number: String,
    pub postcode: String,
    pub country: String,
}

/// Denormalized copy of the ordered product, as the client saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedProduct {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
}

/// Order status lifecycle.
///
/// This pipeline only ever writes `Pending`; later transitions happen outside
/// of it, so unknown stored values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Other(s) => s,
        }
    }

    pub fn from_stored(value: &str) -> Self {
        match value {
            "pending" => Self::Pending,
            other => Self::Other(other.to_string()),
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated order with its reference, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub reference: OrderReference,
    pub customer: Customer,
    pub address: ShippingAddress,
    pub product: OrderedProduct,
    pub status: OrderStatus,
    /// Truncated to microseconds so it survives a Postgres `TIMESTAMPTZ` round-trip.
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Turn a validated request into a `pending` order placed now.
    pub fn place(request: OrderRequest, reference: OrderReference) -> Self {
        Self::place_at(request, reference, Utc::now())
    }

    pub fn place_at(request: OrderRequest, reference: OrderReference, now: DateTime<Utc>) -> Self {
        let OrderRequest {
            customer,
            address,
            product,
        } = request;
        Self {
            reference,
            customer,
            address,
            product,
            status: OrderStatus::Pending,
            placed_at: now.trunc_subsecs(6),
        }
    }
}

/// An order together with the identifier the store assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedOrder {
    pub id: OrderId,
    pub order: Order,
}

impl Entity for PersistedOrder {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
