//! Infrastructure layer: configuration and order storage.

pub mod config;
pub mod repository;

pub use config::{AppConfig, ConfigError, DatabaseConfig, EmailConfig};
pub use repository::{
    InMemoryOrderRepository, OrderRepository, PostgresOrderRepository, RepositoryError,
};
