use thiserror::Error;

/// Failure of an order submission before it was durably recorded.
///
/// The `Display` text is what the client sees in the `error` field, so the
/// wording of the client-side variants is part of the HTTP contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// The body was not a JSON object of the expected shape.
    #[error("Invalid JSON body")]
    Parse(String),

    /// One or more required fields are absent or blank.
    #[error("Missing required fields")]
    Validation { missing: Vec<&'static str> },

    /// A required external setting (e.g. the database connection string) is absent.
    #[error("{0}")]
    Configuration(String),

    /// The order store rejected or failed the write.
    #[error("{0}")]
    Persistence(String),
}

impl OrderError {
    pub fn parse(detail: impl Into<String>) -> Self {
        Self::Parse(detail.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// True when the submitter can fix the problem by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::Validation { .. })
    }

    /// Stable, log-friendly name of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parse(_) => "parse_error",
            Self::Validation { .. } => "validation_error",
            Self::Configuration(_) => "configuration_error",
            Self::Persistence(_) => "persistence_error",
        }
    }
}
