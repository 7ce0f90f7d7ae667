use std::collections::HashSet;
use std::sync::LazyLock;

use meister_core::{DomainError, DomainResult, Entity, Price, ProductId};

use crate::product::Product;

/// Read-only, ordered list of products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting invalid records and duplicate ids.
    pub fn new(products: Vec<Product>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            product.validate()?;
            if !seen.insert(product.id().clone()) {
                return Err(DomainError::validation(format!(
                    "duplicate product id: {}",
                    product.id()
                )));
            }
        }
        Ok(Self { products })
    }

    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

static STOREFRONT: LazyLock<Catalog> = LazyLock::new(|| Catalog {
    products: storefront_products(),
});

/// The catalog shipped with the storefront.
pub fn storefront() -> &'static Catalog {
    &STOREFRONT
}

fn unsplash(photo: &str) -> String {
    format!("https://images.unsplash.com/{photo}?auto=format&fit=crop&w=1200&q=80")
}

fn storefront_products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new("bett-001"),
            name: "Echtholz Bett".to_string(),
            price: Price::from_cents(129_900),
            tagline: "Schlafende Architektur.".to_string(),
            description: "Zeitloses, nachhaltiges Bett aus deutschem Echtholz – individuell \
                          handgefertigt. Die Konstruktion verzichtet auf unnötige \
                          Metallverbindungen und setzt auf klassische Holzverbindungen."
                .to_string(),
            material: "Echtholz, deutsche Eiche, geölt.".to_string(),
            dimensions: "B: 180 cm, L: 200 cm, H: 40 cm".to_string(),
            sustainability: "Holz aus nachhaltiger deutscher Forstwirtschaft (FSC zertifiziert)."
                .to_string(),
            images: vec![
                unsplash("photo-1616594039964-408e4900d6e0"),
                unsplash("photo-1617325247661-675ab4b64ae8"),
                unsplash("photo-1595526114035-0d45ed16cfbf"),
                unsplash("photo-1505693396355-d6f22d366f98"),
            ],
        },
        Product {
            id: ProductId::new("stuhl-002"),
            name: "Stuhl Minimal".to_string(),
            price: Price::from_cents(49_900),
            tagline: "Reduktion auf das Wesentliche.".to_string(),
            description: "Schlichter, moderner Stuhl aus deutscher Eiche – langlebig, stabil \
                          und nachhaltig handgefertigt. Die Lehne ist ergonomisch geneigt, ohne \
                          die geometrische Strenge zu brechen."
                .to_string(),
            material: "Echtholz, deutsche Eiche / Esche.".to_string(),
            dimensions: "H: 90 cm, Sitzhöhe: 45 cm, B: 48 cm".to_string(),
            sustainability: "Lokale Fertigung, kurze Transportwege.".to_string(),
            images: vec![
                unsplash("photo-1592078615290-033ee584e267"),
                unsplash("photo-1503602642458-2321114458c4"),
                unsplash("photo-1567538096630-e0c55bd6374c"),
            ],
        },
        Product {
            id: ProductId::new("tisch-003"),
            name: "Kleiner Beistelltisch".to_string(),
            price: Price::from_cents(39_900),
            tagline: "Der stille Begleiter.".to_string(),
            description: "Multifunktionaler Beistelltisch bzw. Nachttisch – gefertigt aus \
                          nachhaltiger deutscher Eiche. Passt sich durch seine schlichte \
                          Kubatur jedem Raum an."
                .to_string(),
            material: "Massive Eiche.".to_string(),
            dimensions: "B: 40 cm, T: 35 cm, H: 43 cm".to_string(),
            sustainability: "Restverwertung aus der Möbelproduktion (Zero Waste Ansatz)."
                .to_string(),
            images: vec![
                unsplash("photo-1533090481720-856c6e3c1fdc"),
                unsplash("photo-1532372320572-cda25653a26d"),
                unsplash("photo-1604578762246-41134e37f9cc"),
            ],
        },
    ]
}
