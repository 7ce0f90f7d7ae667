use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use crate::error::NotificationError;
use crate::message::EmailMessage;

pub const DEFAULT_RESEND_BASE_URL: &str = "https://api.resend.com";

/// Outbound email transport.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Submit one message. `Ok` means the provider accepted it (2xx).
    async fn send(&self, message: &EmailMessage) -> Result<(), NotificationError>;
}

/// Client for the Resend HTTP API (`POST {base}/emails`, bearer auth).
#[derive(Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl ResendMailer {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NotificationError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotificationError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/emails", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl core::fmt::Debug for ResendMailer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResendMailer")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    #[instrument(
        skip(self, message),
        fields(kind = message.kind.as_str(), endpoint = %self.endpoint),
        err
    )]
    async fn send(&self, message: &EmailMessage) -> Result<(), NotificationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(message)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NotificationError::Timeout(self.timeout)
                } else {
                    NotificationError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(NotificationError::Rejected {
            status: status.as_u16(),
            message: provider_error_message(&body),
        })
    }
}

/// Pull `message` out of a provider error body, falling back to the raw text.
fn provider_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
