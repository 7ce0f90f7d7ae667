use std::sync::Arc;

use axum::{body::Bytes, extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::services::AppServices;
use crate::app::{checkout, dto, errors};

/// `POST /order`. The body is read raw so any content type is accepted.
pub async fn submit_order(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> axum::response::Response {
    match checkout::submit_order(&services, &body).await {
        Ok(submitted) => Json(dto::OrderAccepted::from(submitted)).into_response(),
        Err(e) => errors::order_error_to_response(&e),
    }
}

/// `OPTIONS /order` (CORS preflight).
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}
