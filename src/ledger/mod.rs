//! Ledger domain models: line items, the ordered item list, and the ledger state.

pub mod item;
pub mod state;

pub use item::{parse_decimal, ItemId, LineItem};
pub use state::{ItemList, LedgerState, DEFAULT_BUDGET, DEFAULT_TAX_RATE};
