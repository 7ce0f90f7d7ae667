//! Order notification emails.
//!
//! Renders the customer receipt and the business alert for a placed order and
//! hands them to a transactional-email provider. Delivery is best effort: a
//! failed send is reported, never raised.

pub mod dispatcher;
pub mod error;
pub mod mailer;
pub mod message;
pub mod templates;

pub use dispatcher::{DispatchReport, NotificationDispatcher, SendOutcome};
pub use error::NotificationError;
pub use mailer::{Mailer, ResendMailer};
pub use message::{EmailMessage, MailSettings, MessageKind};
