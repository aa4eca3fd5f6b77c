//! Ledger ownership, services, and host helpers.

pub mod clock;
pub mod ledger_store;
pub mod reveal;
pub mod services;
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use ledger_store::LedgerStore;
pub use reveal::RevealOutcome;
