use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use meister_core::ProductId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    Json(dto::ProductList {
        items: services.catalog.all(),
    })
    .into_response()
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.catalog.get(&ProductId::new(id)) {
        Some(product) => Json(product).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "Product not found"),
    }
}
