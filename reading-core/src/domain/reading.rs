use time::OffsetDateTime;

/// A single cumulative meter reading.
///
/// `ts` is always a fully qualified instant; the civil-time interpretation
/// (fixed UTC+5:30, see [`crate::timefmt::IST`]) is attached exactly once at
/// intake and never re-applied.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterReading {
    pub ts: OffsetDateTime,
    /// Cumulative register value in kWh. Non-negative and, under normal
    /// meter operation, non-decreasing across the record set.
    pub kwh: f64,
}

impl MeterReading {
    pub fn new(ts: OffsetDateTime, kwh: f64) -> Self {
        Self { ts, kwh }
    }
}
