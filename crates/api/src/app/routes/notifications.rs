use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    response::IntoResponse,
    Json,
};

use crate::app::services::AppServices;
use crate::app::{checkout, dto, errors};

/// `POST /orders/:reference/notifications`: send both emails of a stored order again.
pub async fn resend_notifications(
    Extension(services): Extension<Arc<AppServices>>,
    Path(reference): Path<String>,
) -> axum::response::Response {
    match checkout::resend_notifications(&services, &reference).await {
        Ok(resent) => Json(dto::NotificationsResent::from(resent)).into_response(),
        Err(e) => errors::resend_error_to_response(&e),
    }
}
