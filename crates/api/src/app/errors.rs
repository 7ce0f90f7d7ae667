use axum::http::StatusCode;
use axum::response::IntoResponse;

use meister_orders::OrderError;

use super::checkout::ResendError;
use super::dto::ErrorBody;

pub fn order_error_to_response(err: &OrderError) -> axum::response::Response {
    let status = match err {
        OrderError::Parse(_) | OrderError::Validation { .. } => StatusCode::BAD_REQUEST,
        OrderError::Configuration(_) | OrderError::Persistence(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    json_error(status, err.to_string())
}

pub fn resend_error_to_response(err: &ResendError) -> axum::response::Response {
    let status = match err {
        ResendError::InvalidReference => StatusCode::BAD_REQUEST,
        ResendError::NotFound => StatusCode::NOT_FOUND,
        ResendError::EmailNotConfigured
        | ResendError::DatabaseNotConfigured
        | ResendError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    json_error(status, err.to_string())
}

/// `{success:false, error}` with the given status.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(ErrorBody {
            success: false,
            error: message.into(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use meister_infra::RepositoryError;

    use super::*;

    #[test]
    fn order_errors_map_to_status_codes() {
        let cases = [
            (OrderError::parse("eof"), StatusCode::BAD_REQUEST),
            (
                OrderError::Validation {
                    missing: vec!["email"],
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                OrderError::configuration("DATABASE_URL is not set"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                OrderError::persistence("connection refused"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(order_error_to_response(&err).status(), status, "{err:?}");
        }
    }

    #[test]
    fn resend_errors_map_to_status_codes() {
        assert_eq!(
            resend_error_to_response(&ResendError::InvalidReference).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            resend_error_to_response(&ResendError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            resend_error_to_response(&ResendError::Repository(RepositoryError::Database(
                "down".to_string()
            )))
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
