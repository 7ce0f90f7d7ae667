//! Order pipeline.
//!
//! `Received -> Validated -> Persisted -> NotifiedOrSkipped -> Responded`.
//! Anything failing before `Persisted` is returned as an error with no side
//! effects; once the row exists the submission counts as a success whatever
//! happens to the emails.

use thiserror::Error;
use tracing::{info, warn};

use meister_core::OrderId;
use meister_infra::RepositoryError;
use meister_notifications::{DispatchReport, SendOutcome};
use meister_orders::{Order, OrderError, OrderReference, OrderRequest};

use super::services::AppServices;

pub const DATABASE_NOT_CONFIGURED: &str = "DATABASE_URL is not set";
pub const EMAIL_NOT_CONFIGURED: &str = "RESEND_API_KEY is not set";

/// A durably recorded submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedOrder {
    pub reference: OrderReference,
    pub order_id: OrderId,
    pub notifications: DispatchReport,
}

pub async fn submit_order(services: &AppServices, body: &[u8]) -> Result<SubmittedOrder, OrderError> {
    let Some(repository) = services.repository.as_ref() else {
        warn!("order refused: {DATABASE_NOT_CONFIGURED}");
        return Err(OrderError::configuration(DATABASE_NOT_CONFIGURED));
    };

    let request = OrderRequest::parse(body).inspect_err(|e| match e {
        OrderError::Validation { missing } => {
            warn!(error_kind = e.kind(), missing = ?missing, "order rejected")
        }
        _ => warn!(error_kind = e.kind(), error = ?e, "order rejected"),
    })?;

    let order = Order::place(request, OrderReference::generate());
    info!(
        reference = %order.reference,
        product_id = %order.product.id,
        "order validated"
    );

    let order_id = repository.insert(&order).await.map_err(|e| {
        warn!(reference = %order.reference, error = %e, "order not stored");
        OrderError::from(e)
    })?;
    info!(reference = %order.reference, order_id = %order_id, "order stored");

    let notifications = services.notifications.dispatch(&order).await;
    log_dispatch(&order.reference, &notifications);

    Ok(SubmittedOrder {
        reference: order.reference,
        order_id,
        notifications,
    })
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResendError {
    #[error("RESEND_API_KEY is not set")]
    EmailNotConfigured,
    #[error("DATABASE_URL is not set")]
    DatabaseNotConfigured,
    #[error("Invalid order reference")]
    InvalidReference,
    #[error("Order not found")]
    NotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Outcome of re-sending the emails of a stored order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResentNotifications {
    pub reference: OrderReference,
    pub customer: SendOutcome,
    pub business: SendOutcome,
}

/// Look up a stored order and run both notifications for it again.
pub async fn resend_notifications(
    services: &AppServices,
    reference: &str,
) -> Result<ResentNotifications, ResendError> {
    if !services.notifications.is_enabled() {
        return Err(ResendError::EmailNotConfigured);
    }
    let repository = services
        .repository
        .as_ref()
        .ok_or(ResendError::DatabaseNotConfigured)?;
    let reference: OrderReference = reference
        .parse()
        .map_err(|_| ResendError::InvalidReference)?;

    let stored = repository
        .find_by_reference(&reference)
        .await?
        .ok_or(ResendError::NotFound)?;

    let report = services.notifications.dispatch(&stored.order).await;
    log_dispatch(&reference, &report);

    match report {
        DispatchReport::Attempted { customer, business } => Ok(ResentNotifications {
            reference,
            customer,
            business,
        }),
        DispatchReport::Skipped => Err(ResendError::EmailNotConfigured),
    }
}

fn log_dispatch(reference: &OrderReference, report: &DispatchReport) {
    match report {
        DispatchReport::Skipped => {
            warn!(reference = %reference, "{EMAIL_NOT_CONFIGURED}; order emails skipped")
        }
        DispatchReport::Attempted { customer, business } => {
            log_outcome(reference, "customer_receipt", customer);
            log_outcome(reference, "business_alert", business);
        }
    }
}

fn log_outcome(reference: &OrderReference, kind: &'static str, outcome: &SendOutcome) {
    match outcome {
        SendOutcome::Sent => info!(reference = %reference, kind, "email sent"),
        SendOutcome::Failed(reason) => {
            warn!(reference = %reference, kind, reason = %reason, "email failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use meister_infra::{InMemoryOrderRepository, OrderRepository};
    use meister_notifications::{MailSettings, NotificationDispatcher};

    use super::*;

    fn settings() -> MailSettings {
        MailSettings {
            from_email: "onboarding@resend.dev".to_string(),
            from_name: "ARCHITEKTUNDMEISTER".to_string(),
            reply_to: "shop@example.de".to_string(),
            business_email: "shop@example.de".to_string(),
        }
    }

    fn services(repo: Option<Arc<InMemoryOrderRepository>>) -> AppServices {
        let repository = repo.map(|r| -> Arc<dyn OrderRepository> { r });
        AppServices::new(repository, NotificationDispatcher::disabled(settings()))
    }

    const BODY: &str = r#"{"name":"Anna Muster","email":"a@x.de","street":"Musterweg",
        "houseNumber":"3","postcode":"01097","country":"DE","productId":"bett-001",
        "productName":"Echtholz Bett","productPrice":1299.00}"#;

    #[tokio::test]
    async fn stores_order_and_skips_mail_without_key() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let submitted = submit_order(&services(Some(repo.clone())), BODY.as_bytes())
            .await
            .unwrap();

        assert_eq!(submitted.order_id.get(), 1);
        assert_eq!(submitted.notifications, DispatchReport::Skipped);
        let stored = repo.all().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].order.reference, submitted.reference);
    }

    #[tokio::test]
    async fn refuses_without_database_before_parsing() {
        let err = submit_order(&services(None), b"not json").await.unwrap_err();
        assert_eq!(err, OrderError::configuration(DATABASE_NOT_CONFIGURED));
    }

    #[tokio::test]
    async fn invalid_body_stores_nothing() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let err = submit_order(&services(Some(repo.clone())), br#"{"name":"Anna"}"#)
            .await
            .unwrap_err();
        assert!(err.is_client_error());
        assert!(repo.is_empty().unwrap());
    }

    #[tokio::test]
    async fn resend_requires_email_credential() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let err = resend_notifications(&services(Some(repo)), "AM-2026-7KQ2X")
            .await
            .unwrap_err();
        assert_eq!(err, ResendError::EmailNotConfigured);
        assert_eq!(err.to_string(), "RESEND_API_KEY is not set");
    }
}
