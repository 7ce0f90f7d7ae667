use std::sync::Arc;

use meister_orders::Order;

use crate::mailer::Mailer;
use crate::message::{EmailMessage, MailSettings, MessageKind};
use crate::templates;

/// Result of one send attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    Failed(String),
}

impl SendOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Failed(_) => "failed",
        }
    }
}

/// What happened to the notifications of one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchReport {
    /// No provider credential configured; nothing was sent.
    Skipped,
    Attempted {
        customer: SendOutcome,
        business: SendOutcome,
    },
}

impl DispatchReport {
    pub fn sent_count(&self) -> usize {
        match self {
            Self::Skipped => 0,
            Self::Attempted { customer, business } => {
                usize::from(customer.is_sent()) + usize::from(business.is_sent())
            }
        }
    }
}

/// Renders and sends the customer receipt and the business alert.
///
/// The two sends are independent: either may fail without affecting the other,
/// and neither affects the already stored order.
#[derive(Clone)]
pub struct NotificationDispatcher {
    mailer: Option<Arc<dyn Mailer>>,
    settings: MailSettings,
}

impl NotificationDispatcher {
    pub fn new(mailer: Arc<dyn Mailer>, settings: MailSettings) -> Self {
        Self {
            mailer: Some(mailer),
            settings,
        }
    }

    /// A dispatcher that never sends (no provider credential).
    pub fn disabled(settings: MailSettings) -> Self {
        Self {
            mailer: None,
            settings,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.mailer.is_some()
    }

    pub fn settings(&self) -> &MailSettings {
        &self.settings
    }

    pub fn customer_receipt(&self, order: &Order) -> EmailMessage {
        EmailMessage {
            kind: MessageKind::CustomerReceipt,
            from: self.settings.from_header(),
            reply_to: self.settings.reply_to.clone(),
            to: order.customer.email.clone(),
            subject: templates::customer_subject(order),
            html: templates::customer_receipt(order),
        }
    }

    pub fn business_alert(&self, order: &Order) -> EmailMessage {
        EmailMessage {
            kind: MessageKind::BusinessAlert,
            from: self.settings.from_header(),
            reply_to: self.settings.reply_to.clone(),
            to: self.settings.business_email.clone(),
            subject: templates::business_subject(order),
            html: templates::business_alert(order),
        }
    }

    /// Send both messages concurrently. Never fails; see the report.
    pub async fn dispatch(&self, order: &Order) -> DispatchReport {
        let Some(mailer) = &self.mailer else {
            return DispatchReport::Skipped;
        };

        let customer = self.customer_receipt(order);
        let business = self.business_alert(order);

        let (customer, business) = tokio::join!(
            send_one(mailer.as_ref(), &customer),
            send_one(mailer.as_ref(), &business),
        );

        DispatchReport::Attempted { customer, business }
    }
}

impl core::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("enabled", &self.is_enabled())
            .field("settings", &self.settings)
            .finish()
    }
}

async fn send_one(mailer: &dyn Mailer, message: &EmailMessage) -> SendOutcome {
    match mailer.send(message).await {
        Ok(()) => SendOutcome::Sent,
        Err(e) => SendOutcome::Failed(e.to_string()),
    }
}
