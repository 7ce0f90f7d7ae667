use serde::Serialize;

use meister_catalog::Product;
use meister_core::OrderId;
use meister_orders::OrderReference;

use super::checkout::{ResentNotifications, SubmittedOrder};

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAccepted {
    pub success: bool,
    pub reference: OrderReference,
    pub order_id: OrderId,
}

impl From<SubmittedOrder> for OrderAccepted {
    fn from(submitted: SubmittedOrder) -> Self {
        Self {
            success: true,
            reference: submitted.reference,
            order_id: submitted.order_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NotificationsResent {
    pub success: bool,
    pub reference: OrderReference,
    pub customer: &'static str,
    pub business: &'static str,
}

impl From<ResentNotifications> for NotificationsResent {
    fn from(resent: ResentNotifications) -> Self {
        Self {
            success: true,
            customer: resent.customer.as_str(),
            business: resent.business.as_str(),
            reference: resent.reference,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductList<'a> {
    pub items: &'a [Product],
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}
