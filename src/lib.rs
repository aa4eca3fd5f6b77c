#![doc(test(attr(deny(warnings))))]

//! TCash keeps a personal cash-flow ledger in a plain-text file and derives
//! totals plus daily and monthly summaries from it.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::LedgerStore;
pub use errors::{LedgerError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("TCash tracing initialized.");
    });
}
