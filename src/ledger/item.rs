use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Stable identifier issued to every line item when it enters a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub(crate) u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = std::num::ParseIntError;

    /// Accepts both the bare number and the displayed `#n` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        digits.parse::<u64>().map(ItemId)
    }
}

/// One product entry: name, unit price, and quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub name: String,
    #[serde(alias = "pricePerUnit")]
    pub unit_price: f64,
    pub quantity: u32,
}

impl LineItem {
    /// Builds a validated item; the name is trimmed before checking.
    pub fn new(
        name: impl Into<String>,
        unit_price: f64,
        quantity: u32,
    ) -> Result<Self, ValidationError> {
        let item = Self {
            name: name.into().trim().to_string(),
            unit_price,
            quantity,
        };
        item.validate()?;
        Ok(item)
    }

    /// Parses raw form text into an item.
    pub fn parse(name: &str, unit_price: &str, quantity: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let price = parse_decimal(unit_price)
            .filter(|value| *value > 0.0)
            .ok_or_else(|| ValidationError::InvalidPrice(unit_price.trim().to_string()))?;
        let quantity = quantity
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|value| *value > 0)
            .ok_or_else(|| ValidationError::InvalidQuantity(quantity.trim().to_string()))?;
        Self::new(name, price, quantity)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !self.unit_price.is_finite() || self.unit_price <= 0.0 {
            return Err(ValidationError::InvalidPrice(self.unit_price.to_string()));
        }
        if self.quantity == 0 {
            return Err(ValidationError::InvalidQuantity(self.quantity.to_string()));
        }
        Ok(())
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// Parses decimal text, rejecting empty input and non-finite values.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
