//! Product catalog of the storefront.
//!
//! The catalog is static: it is compiled into the binary, validated once, and
//! never mutated at runtime.

pub mod catalog;
pub mod product;

pub use catalog::{storefront, Catalog};
pub use product::Product;
