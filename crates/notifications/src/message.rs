use serde::Serialize;

/// Sender identity and fixed recipients for order notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSettings {
    pub from_email: String,
    /// Display name; blank means "send from the bare address".
    pub from_name: String,
    pub reply_to: String,
    /// Recipient of the business alert.
    pub business_email: String,
}

impl MailSettings {
    /// `"NAME" <address>` or the bare address when no display name is set.
    pub fn from_header(&self) -> String {
        let name = self.from_name.trim();
        if name.is_empty() {
            self.from_email.clone()
        } else {
            let quoted = name.replace('\\', "\\\\").replace('"', "\\\"");
            format!("\"{quoted}\" <{}>", self.from_email)
        }
    }
}

/// Which of the two per-order messages this is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MessageKind {
    CustomerReceipt,
    BusinessAlert,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CustomerReceipt => "customer_receipt",
            Self::BusinessAlert => "business_alert",
        }
    }
}

/// An outbound email. Field names match the provider's JSON API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    #[serde(skip)]
    pub kind: MessageKind,
    pub from: String,
    pub reply_to: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}
