#![doc(test(attr(deny(warnings))))]

//! Budget tracker: line items with unit price and quantity, pre- and
//! post-tax totals against a budget, and a key-value store that keeps the
//! ledger between sessions.

pub mod cli;
pub mod config;
pub mod controller;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod summary;
pub mod utils;

pub use controller::{InputForm, LedgerController};
pub use errors::{LedgerError, ValidationError};
pub use ledger::{ItemId, LedgerState, LineItem};
pub use summary::Summary;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes global tracing once and logs the startup.
pub fn init() {
    INIT.call_once(|| {
        utils::init_tracing();
        tracing::debug!("budget tracker tracing initialized");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
