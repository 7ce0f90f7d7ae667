//! Postgres-backed order table.
//!
//! ## Error Mapping
//!
//! | SQLx Error | RepositoryError | Scenario |
//! |------------|-----------------|----------|
//! | Database (any code) | `Database` | Constraint or statement failure, including `57014` (statement timeout) |
//! | PoolTimedOut | `Database` | No connection within the configured timeout |
//! | PoolClosed | `Database` | Pool shut down |
//! | ColumnDecode / Decode | `Corrupt` | Row does not fit the order shape |
//! | Other | `Database` | Network errors, connection failures, etc. |
//!
//! Prices are stored as `NUMERIC(12,2)` euros but travel over the wire as
//! integer cents so no float rounding happens on either side.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::instrument;

use meister_core::{OrderId, Price, ProductId};
use meister_orders::{
    Customer, Order, OrderReference, OrderStatus, OrderedProduct, PersistedOrder, ShippingAddress,
};

use super::{OrderRepository, RepositoryError};

const CREATE_ORDERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS orders (
    id             BIGSERIAL PRIMARY KEY,
    reference      TEXT NOT NULL,
    customer_name  TEXT NOT NULL,
    customer_email TEXT NOT NULL,
    customer_phone TEXT,
    street         TEXT NOT NULL,
    house_number   TEXT NOT NULL,
    postcode       TEXT NOT NULL,
    country        TEXT NOT NULL,
    product_id     TEXT NOT NULL,
    product_name   TEXT NOT NULL,
    product_price  NUMERIC(12,2) NOT NULL,
    status         TEXT NOT NULL DEFAULT 'pending',
    created_at     TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

// References are random, not unique; collisions are tolerated.
const CREATE_REFERENCE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS orders_reference_idx ON orders (reference)";

const INSERT_ORDER: &str = r#"
INSERT INTO orders (
    reference, customer_name, customer_email, customer_phone,
    street, house_number, postcode, country,
    product_id, product_name, product_price, status, created_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, ($11::BIGINT)::NUMERIC / 100, $12, $13)
RETURNING id
"#;

const SELECT_BY_REFERENCE: &str = r#"
SELECT id, reference, customer_name, customer_email, customer_phone,
       street, house_number, postcode, country,
       product_id, product_name, (product_price * 100)::BIGINT AS product_price_cents,
       status, created_at
FROM orders
WHERE reference = $1
ORDER BY id DESC
LIMIT 1
"#;

#[derive(Debug, Clone)]
pub struct PostgresOrderRepository {
    pool: Arc<PgPool>,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Build a pool that connects on first use.
    ///
    /// `timeout` bounds both connection acquisition and every statement
    /// (`statement_timeout`), so a stalled database surfaces as an error
    /// instead of a hung request.
    pub fn connect_lazy(url: &str, timeout: Duration) -> Result<Self, RepositoryError> {
        // sqlx parses any scheme here; only the Postgres ones make sense.
        if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
            return Err(RepositoryError::Database(
                "invalid DATABASE_URL: expected a postgres:// or postgresql:// URL".to_string(),
            ));
        }

        let statement_timeout = timeout.as_millis().to_string();
        let options = PgConnectOptions::from_str(url)
            .map_err(|e| RepositoryError::Database(format!("invalid DATABASE_URL: {e}")))?
            .options([("statement_timeout", statement_timeout.as_str())]);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(timeout)
            .connect_lazy_with(options);

        Ok(Self::new(pool))
    }

    /// Create the `orders` table and its reference index when missing.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(CREATE_ORDERS_TABLE)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        sqlx::query(CREATE_REFERENCE_INDEX)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    #[instrument(
        skip(self, order),
        fields(reference = %order.reference, product_id = %order.product.id),
        err
    )]
    async fn insert(&self, order: &Order) -> Result<OrderId, RepositoryError> {
        let id: i64 = sqlx::query_scalar(INSERT_ORDER)
            .bind(order.reference.as_str())
            .bind(&order.customer.name)
            .bind(&order.customer.email)
            .bind(order.customer.phone.as_deref())
            .bind(&order.address.street)
            .bind(&order.address.house_number)
            .bind(&order.address.postcode)
            .bind(&order.address.country)
            .bind(order.product.id.as_str())
            .bind(&order.product.name)
            .bind(order.product.price.cents())
            .bind(order.status.as_str())
            .bind(order.placed_at)
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert_order", e))?;

        Ok(OrderId::new(id))
    }

    #[instrument(skip(self), fields(reference = %reference), err)]
    async fn find_by_reference(
        &self,
        reference: &OrderReference,
    ) -> Result<Option<PersistedOrder>, RepositoryError> {
        let row: Option<OrderRow> = sqlx::query_as(SELECT_BY_REFERENCE)
            .bind(reference.as_str())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_order_by_reference", e))?;

        row.map(PersistedOrder::try_from).transpose()
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => match db_err.code() {
            Some(code) if code.as_ref() == "57014" => {
                RepositoryError::Database(format!("database statement timed out in {operation}"))
            }
            _ => RepositoryError::Database(format!(
                "database error in {operation}: {}",
                db_err.message()
            )),
        },
        sqlx::Error::PoolTimedOut => {
            RepositoryError::Database(format!("database unavailable in {operation}: timed out"))
        }
        sqlx::Error::PoolClosed => {
            RepositoryError::Database(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            RepositoryError::Corrupt(format!("{operation}: {err}"))
        }
        _ => RepositoryError::Database(format!("database error in {operation}: {err}")),
    }
}

#[derive(Debug)]
struct OrderRow {
    id: i64,
    reference: String,
    customer_name: String,
    customer_email: String,
    customer_phone: Option<String>,
    street: String,
    house_number: String,
    postcode: String,
    country: String,
    product_id: String,
    product_name: String,
    product_price_cents: i64,
    status: String,
    created_at: DateTime<Utc>,
}

impl<'r> sqlx::FromRow<'r, PgRow> for OrderRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(OrderRow {
            id: row.try_get("id")?,
            reference: row.try_get("reference")?,
            customer_name: row.try_get("customer_name")?,
            customer_email: row.try_get("customer_email")?,
            customer_phone: row.try_get("customer_phone")?,
            street: row.try_get("street")?,
            house_number: row.try_get("house_number")?,
            postcode: row.try_get("postcode")?,
            country: row.try_get("country")?,
            product_id: row.try_get("product_id")?,
            product_name: row.try_get("product_name")?,
            product_price_cents: row.try_get("product_price_cents")?,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl TryFrom<OrderRow> for PersistedOrder {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let reference = row
            .reference
            .parse::<OrderReference>()
            .map_err(|e| RepositoryError::Corrupt(format!("order {}: {e}", row.id)))?;

        Ok(PersistedOrder {
            id: OrderId::new(row.id),
            order: Order {
                reference,
                customer: Customer {
                    name: row.customer_name,
                    email: row.customer_email,
                    phone: row.customer_phone,
                },
                address: ShippingAddress {
                    street: row.street,
                    house_number: row.house_number,
                    postcode: row.postcode,
                    country: row.country,
                },
                product: OrderedProduct {
                    id: ProductId::new(row.product_id),
                    name: row.product_name,
                    price: Price::from_cents(row.product_price_cents),
                },
                status: OrderStatus::from_stored(&row.status),
                placed_at: row.created_at,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(reference: &str) -> OrderRow {
        OrderRow {
            id: 7,
            reference: reference.to_string(),
            customer_name: "Anna Muster".to_string(),
            customer_email: "a@x.de".to_string(),
            customer_phone: None,
            street: "Musterweg".to_string(),
            house_number: "3".to_string(),
            postcode: "01097".to_string(),
            country: "DE".to_string(),
            product_id: "bett-001".to_string(),
            product_name: "Echtholz Bett".to_string(),
            product_price_cents: 129_900,
            status: "shipped".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn row_converts_into_persisted_order() {
        let order = PersistedOrder::try_from(row("AM-2026-7KQ2X")).unwrap();
        assert_eq!(order.id.get(), 7);
        assert_eq!(order.order.reference.as_str(), "AM-2026-7KQ2X");
        assert_eq!(order.order.product.price, Price::from_cents(129_900));
        assert_eq!(order.order.status, OrderStatus::Other("shipped".to_string()));
    }

    #[test]
    fn malformed_reference_is_corrupt() {
        let err = PersistedOrder::try_from(row("not-a-reference")).unwrap_err();
        assert!(matches!(err, RepositoryError::Corrupt(_)));
    }

    #[test]
    fn pool_errors_map_to_database_messages() {
        let err = map_sqlx_error("insert_order", sqlx::Error::PoolTimedOut);
        assert_eq!(
            err.to_string(),
            "database unavailable in insert_order: timed out"
        );
        let err = map_sqlx_error("insert_order", sqlx::Error::PoolClosed);
        assert_eq!(err.to_string(), "connection pool closed in insert_order");
    }

    #[tokio::test]
    async fn rejects_unparsable_connection_string() {
        let err = PostgresOrderRepository::connect_lazy(
            "postgres://shop@localhost:notaport/shop",
            Duration::from_secs(1),
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("invalid DATABASE_URL"), "{err}");
    }

    #[tokio::test]
    async fn rejects_non_postgres_scheme() {
        let err = PostgresOrderRepository::connect_lazy("mysql://nope", Duration::from_secs(1))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid DATABASE_URL: expected a postgres:// or postgresql:// URL"
        );
    }

    #[tokio::test]
    async fn valid_url_builds_a_lazy_pool_without_connecting() {
        for url in [
            "postgres://shop:pw@127.0.0.1:1/shop",
            "postgresql://shop@localhost/shop",
        ] {
            assert!(
                PostgresOrderRepository::connect_lazy(url, Duration::from_secs(1)).is_ok(),
                "{url}"
            );
        }
    }
}
