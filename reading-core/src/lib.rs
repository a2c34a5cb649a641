//! Domain types and the timestamp/consumption pipeline for a household
//! electricity-reading ledger.
//!
//! The crate is intentionally I/O-free: it defines the [`MeterReading`]
//! domain type, the fixed-timezone timestamp normalizer ([`timefmt`]) and the
//! per-period consumption deriver ([`consumption`]). Persistence lives in the
//! service crate behind a store trait.

pub mod consumption;
pub mod domain;
pub mod timefmt;

pub use consumption::{ConsumptionSample, ConsumptionSeries, TrendSummary};
pub use domain::MeterReading;
