use thiserror::Error;

use crate::ledger::ItemId;

/// Reasons a line item submission is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("product name must not be empty")]
    EmptyName,
    #[error("price per unit must be a number greater than zero (got `{0}`)")]
    InvalidPrice(String),
    #[error("quantity must be a whole number greater than zero (got `{0}`)")]
    InvalidQuantity(String),
}

/// Error type that captures ledger, storage, and configuration failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Please enter valid product details: {0}")]
    Validation(#[from] ValidationError),
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}
