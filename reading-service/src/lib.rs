pub mod config;
pub mod intake;
pub mod ledger;
pub mod observability;
pub mod report;
pub mod store;

pub use ledger::{LoadOutcome, ReadingLedger};
