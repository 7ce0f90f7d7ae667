//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: repository, notification dispatcher and catalog handles
//! - `checkout.rs`: the order pipeline behind `POST /order`
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: response bodies
//! - `errors.rs`: consistent `{success:false, error}` responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub mod checkout;
pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: AppServices) -> Router {
    let services = Arc::new(services);

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(services)),
        )
}
