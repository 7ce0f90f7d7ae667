//! Human-readable order references (`AM-2026-7KQ2X`).

use core::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use meister_core::DomainError;

pub const REFERENCE_PREFIX: &str = "AM";
pub const SUFFIX_LEN: usize = 5;

const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Order reference handed to the customer.
///
/// Expected, not guaranteed, to be unique: there is no lookup against
/// existing references when one is generated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderReference(String);

impl OrderReference {
    /// Generate a reference for the current UTC calendar year.
    pub fn generate() -> Self {
        Self::generate_with(Utc::now(), &mut rand::rng())
    }

    /// Generate a reference for the year of `now`, drawing the suffix from `rng`.
    pub fn generate_with<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> Self {
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        Self(format!("{REFERENCE_PREFIX}-{:04}-{suffix}", now.year()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn year(&self) -> i32 {
        // Well-formed by construction: `AM-` followed by four digits.
        self.0[REFERENCE_PREFIX.len() + 1..REFERENCE_PREFIX.len() + 5]
            .parse()
            .unwrap_or_default()
    }

    pub fn suffix(&self) -> &str {
        &self.0[self.0.len() - SUFFIX_LEN..]
    }

    fn is_well_formed(s: &str) -> bool {
        let mut parts = s.split('-');
        let (Some(prefix), Some(year), Some(suffix), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };

        prefix == REFERENCE_PREFIX
            && year.len() == 4
            && year.bytes().all(|b| b.is_ascii_digit())
            && suffix.len() == SUFFIX_LEN
            && suffix.bytes().all(|b| ALPHABET.contains(&b))
    }
}

impl core::fmt::Display for OrderReference {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for OrderReference {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_well_formed(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(DomainError::invalid_id(format!("OrderReference: {s:?}")))
        }
    }
}

impl TryFrom<String> for OrderReference {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OrderReference> for String {
    fn from(reference: OrderReference) -> Self {
        reference.0
    }
}
