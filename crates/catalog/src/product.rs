use serde::{Deserialize, Serialize};

use meister_core::{DomainError, DomainResult, Entity, Price, ProductId};

/// A piece of furniture offered in the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub tagline: String,
    pub description: String,
    pub material: String,
    pub dimensions: String,
    /// Sustainability note shown on the product page.
    pub sustainability: String,
    /// Image URLs in display order; the first one is the cover image.
    pub images: Vec<String>,
}

impl Product {
    /// Check the record invariants: non-negative price and at least one image.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation(format!("product {}: empty name", self.id)));
        }
        if self.price.cents() < 0 {
            return Err(DomainError::validation(format!("product {}: negative price", self.id)));
        }
        if self.images.is_empty() {
            return Err(DomainError::validation(format!("product {}: no images", self.id)));
        }
        Ok(())
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
