//! Checkout submissions: typed parsing and validation at the HTTP boundary.

use serde::Deserialize;

use meister_core::{Price, ProductId};

use crate::error::OrderError;
use crate::order::{Customer, OrderedProduct, ShippingAddress};

/// Required fields, by their wire names.
pub const REQUIRED_FIELDS: [&str; 9] = [
    "name",
    "email",
    "street",
    "houseNumber",
    "postcode",
    "country",
    "productId",
    "productName",
    "productPrice",
];

/// Wire shape of the checkout form. Everything is optional here so that a
/// missing field is reported as such instead of as a JSON error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOrderRequest {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    street: Option<String>,
    house_number: Option<String>,
    postcode: Option<String>,
    country: Option<String>,
    product_id: Option<String>,
    product_name: Option<String>,
    product_price: Option<f64>,
}

/// A complete, validated checkout submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub customer: Customer,
    pub address: ShippingAddress,
    pub product: OrderedProduct,
}

impl OrderRequest {
    /// Parse and validate a raw request body.
    ///
    /// All-or-nothing: either every required field is present and non-blank
    /// or nothing is accepted.
    pub fn parse(body: &[u8]) -> Result<Self, OrderError> {
        let raw: RawOrderRequest =
            serde_json::from_slice(body).map_err(|e| OrderError::parse(e.to_string()))?;
        Self::validate(raw)
    }

    fn validate(raw: RawOrderRequest) -> Result<Self, OrderError> {
        let mut missing = Vec::new();
        let mut required = |field: &'static str, value: Option<String>| -> String {
            match value.map(|v| v.trim().to_string()) {
                Some(v) if !v.is_empty() => v,
                _ => {
                    missing.push(field);
                    String::new()
                }
            }
        };

        let name = required("name", raw.name);
        let email = required("email", raw.email);
        let street = required("street", raw.street);
        let house_number = required("houseNumber", raw.house_number);
        let postcode = required("postcode", raw.postcode);
        let country = required("country", raw.country);
        let product_id = required("productId", raw.product_id);
        let product_name = required("productName", raw.product_name);

        let price = match raw.product_price {
            Some(amount) if missing.is_empty() => {
                Price::from_eur(amount).map_err(|e| OrderError::parse(e.to_string()))?
            }
            Some(_) => return Err(OrderError::Validation { missing }),
            None => {
                missing.push("productPrice");
                return Err(OrderError::Validation { missing });
            }
        };

        let phone = raw
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        Ok(Self {
            customer: Customer { name, email, phone },
            address: ShippingAddress {
                street,
                house_number,
                postcode,
                country,
            },
            product: OrderedProduct {
                id: ProductId::new(product_id),
                name: product_name,
                price,
            },
        })
    }
}
