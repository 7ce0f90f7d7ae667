//! EUR prices held in cents.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};

/// A EUR amount in the smallest currency unit (cents).
///
/// On the wire (JSON) a price is a plain number in EUR (`1299.0`), which is
/// what the storefront client sends and reads.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Price {
    cents: i64,
}

// Largest EUR amount that still fits in `i64` cents without precision loss in f64.
const MAX_EUR: f64 = 9_007_199_254_740.0;

impl Price {
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Convert a EUR amount to cents, rounding to the nearest cent.
    pub fn from_eur(amount: f64) -> DomainResult<Self> {
        if !amount.is_finite() || amount.abs() > MAX_EUR {
            return Err(DomainError::validation(format!("price out of range: {amount}")));
        }
        Ok(Self {
            cents: (amount * 100.0).round() as i64,
        })
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    pub fn as_eur(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// German-locale currency rendering, e.g. `1.299,00 €`.
    ///
    /// Matches what a `de-DE` EUR number formatter prints (non-breaking space
    /// before the currency sign).
    pub fn format_de(&self) -> String {
        let abs = self.cents.unsigned_abs();
        let euros = (abs / 100).to_string();
        let cents = abs % 100;

        let mut grouped = String::with_capacity(euros.len() + euros.len() / 3);
        for (idx, ch) in euros.chars().enumerate() {
            if idx > 0 && (euros.len() - idx) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        let sign = if self.cents < 0 { "-" } else { "" };
        format!("{sign}{grouped},{cents:02}\u{a0}€")
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.format_de())
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_eur())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Price::from_eur(amount).map_err(serde::de::Error::custom)
    }
}
