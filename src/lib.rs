#![doc(test(attr(deny(warnings))))]

//! Finance Core is the ledger and aggregation engine behind a personal
//! organizer: it records money movements, derives account balances, tracks
//! savings goals and installment plans, and computes monthly budgets.

pub mod core;
pub mod domain;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
