use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

pub mod notifications;
pub mod order;
pub mod products;
pub mod system;

/// Router for the storefront endpoints.
pub fn router() -> Router {
    Router::new()
        .merge(order_router())
        .route("/products", get(products::list_products))
        .route("/products/:id", get(products::get_product))
        .route(
            "/orders/:reference/notifications",
            post(notifications::resend_notifications),
        )
}

/// `/order`, open to any origin; every response carries the CORS headers.
fn order_router() -> Router {
    Router::new()
        .route("/order", post(order::submit_order).options(order::preflight))
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static("*"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static("POST, OPTIONS"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static("content-type"),
                )),
        )
}
