use std::time::Duration;

use thiserror::Error;

/// Failure to hand a message to the email provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// The provider answered with a non-2xx status.
    #[error("email provider rejected message ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("email provider request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection, TLS or body transfer failure.
    #[error("email provider unreachable: {0}")]
    Transport(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build email client: {0}")]
    Client(String),
}
