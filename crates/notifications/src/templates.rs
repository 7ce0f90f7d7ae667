//! HTML bodies of the two order emails.
//!
//! Both documents share one fixed layout (header, content, details blocks).
//! Every value that came from the checkout form is HTML-escaped.

use chrono::{DateTime, Datelike, Timelike, Utc};

use meister_orders::Order;

const CUSTOMER_STYLE: &str = "body{font-family:'Inter',sans-serif;line-height:1.6;color:#111}\
.container{max-width:600px;margin:0 auto;padding:20px}\
.header{background:#111;color:#fff;padding:30px;text-align:center}\
.content{background:#f9f9f9;padding:30px}\
.reference{font-size:24px;font-weight:bold;margin:20px 0}\
.details{background:#fff;padding:20px;margin:20px 0;border-left:3px solid #111}\
.footer{text-align:center;padding:20px;color:#666;font-size:12px}";

const BUSINESS_STYLE: &str = "body{font-family:'Inter',sans-serif;line-height:1.6;color:#111}\
.container{max-width:600px;margin:0 auto;padding:20px}\
.header{background:#111;color:#fff;padding:30px;text-align:center}\
.content{background:#f9f9f9;padding:30px}\
.reference{font-size:24px;font-weight:bold;margin:20px 0;color:#111}\
.details{background:#fff;padding:20px;margin:20px 0;border-left:3px solid #111}\
.section{margin:15px 0}\
.label{font-weight:bold;color:#666}";

pub const BUSINESS_NAME: &str = "Architekt & Meister";
const BUSINESS_ADDRESS: &str = "Buchenstraße 20, 01097 Dresden";
const BUSINESS_CONTACT: &str = "architektundmeister@gmail.com | +49 151 22807682";

const MONTHS_DE: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

pub fn customer_subject(order: &Order) -> String {
    format!("Bestätigung Ihrer Bestellung - {}", order.reference)
}

pub fn business_subject(order: &Order) -> String {
    format!("Neue Bestellung: {}", order.reference)
}

/// Receipt sent to the customer.
pub fn customer_receipt(order: &Order) -> String {
    let name = escape(&order.customer.name);
    let reference = escape(order.reference.as_str());
    let product = escape(&order.product.name);
    let price = order.product.price.format_de();
    let business = escape(BUSINESS_NAME);
    let address = escape(BUSINESS_ADDRESS);
    let contact = escape(BUSINESS_CONTACT);

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8">
<style>{CUSTOMER_STYLE}</style>
</head>
<body>
<div class="container">
<div class="header"><h1 style="margin:0;font-size:32px">Vielen Dank für Ihre Bestellung</h1></div>
<div class="content">
<p>Sehr geehrte/r {name},</p>
<p>vielen Dank für Ihre Bestellung bei {business}.</p>
<div class="details"><p class="reference">Referenznummer: {reference}</p><p><strong>Produkt:</strong> {product}</p><p><strong>Preis:</strong> {price}</p></div>
<p>Wir werden Ihre Anfrage schnellstmöglich bearbeiten und uns in Kürze bei Ihnen melden.</p>
<p>Bei Fragen stehen wir Ihnen gerne zur Verfügung.</p>
<p>Mit freundlichen Grüßen,<br>{business}</p>
</div>
<div class="footer"><p>{business}<br>{address}<br>{contact}</p></div>
</div>
</body>
</html>"#
    )
}

/// Alert sent to the business mailbox.
pub fn business_alert(order: &Order) -> String {
    let reference = escape(order.reference.as_str());
    let product = escape(&order.product.name);
    let product_id = escape(order.product.id.as_str());
    let price = order.product.price.format_de();
    let name = escape(&order.customer.name);
    let email = escape(&order.customer.email);
    let street = escape(&order.address.street);
    let house_number = escape(&order.address.house_number);
    let postcode = escape(&order.address.postcode);
    let country = escape(&order.address.country);
    let placed_at = format_placed_at(order.placed_at);

    let phone_block = match order.customer.phone.as_deref() {
        Some(phone) => {
            let phone = escape(phone);
            format!(
                r#"<div class="section"><span class="label">Telefon:</span> <a href="tel:{phone}">{phone}</a></div>"#
            )
        }
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8">
<style>{BUSINESS_STYLE}</style>
</head>
<body>
<div class="container">
<div class="header"><h1 style="margin:0;font-size:32px">Neue Bestellung</h1></div>
<div class="content">
<p class="reference">Referenz: {reference}</p>
<div class="details"><h2 style="margin-top:0">Produktinformationen</h2>
<div class="section"><span class="label">Produkt:</span> {product}</div>
<div class="section"><span class="label">Produkt-ID:</span> {product_id}</div>
<div class="section"><span class="label">Preis:</span> {price}</div></div>
<div class="details"><h2 style="margin-top:0">Kundeninformationen</h2>
<div class="section"><span class="label">Name:</span> {name}</div>
<div class="section"><span class="label">E-Mail:</span> <a href="mailto:{email}">{email}</a></div>{phone_block}</div>
<div class="details"><h2 style="margin-top:0">Lieferadresse</h2>
<div class="section">{street} {house_number}<br>{postcode} {country}</div></div>
<p style="margin-top:30px;padding-top:20px;border-top:1px solid #ddd;color:#666;font-size:12px">Bestellt am: {placed_at}</p>
</div>
</div>
</body>
</html>"#
    )
}

/// German long date with short time, e.g. `16. Oktober 2026 um 14:30 UTC`.
pub fn format_placed_at(at: DateTime<Utc>) -> String {
    let month = MONTHS_DE[at.month0() as usize];
    format!(
        "{}. {} {} um {:02}:{:02} UTC",
        at.day(),
        month,
        at.year(),
        at.hour(),
        at.minute()
    )
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
