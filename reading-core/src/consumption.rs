//! Per-period consumption derived from cumulative readings.

use time::OffsetDateTime;

use crate::domain::MeterReading;

/// One derived consumption figure. Never persisted.
///
/// `delta_kwh` is `None` for the chronologically first reading, otherwise
/// the difference from the immediately preceding reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsumptionSample {
    pub ts: OffsetDateTime,
    pub delta_kwh: Option<f64>,
}

/// Aggregate trend over the whole record set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendSummary {
    pub from: OffsetDateTime,
    pub to: OffsetDateTime,
    pub total_kwh: f64,
    pub days: f64,
    pub avg_daily_kwh: f64,
}

/// Readings sorted chronologically, plus the successive-difference view over
/// them.
///
/// Sorting happens once at construction; [`ConsumptionSeries::samples`] is a
/// lazy iterator that can be restarted any number of times and yields the
/// same values on every pass.
#[derive(Debug, Clone)]
pub struct ConsumptionSeries {
    readings: Vec<MeterReading>,
}

impl ConsumptionSeries {
    /// Stable sort ascending by timestamp: readings with equal timestamps
    /// keep their input order, and any input permutation of the same record
    /// set produces the same sample sequence.
    pub fn new(mut readings: Vec<MeterReading>) -> Self {
        readings.sort_by(|a, b| a.ts.cmp(&b.ts));
        Self { readings }
    }

    pub fn readings(&self) -> &[MeterReading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn samples(&self) -> impl Iterator<Item = ConsumptionSample> + '_ {
        self.readings.iter().enumerate().map(|(i, r)| ConsumptionSample {
            ts: r.ts,
            delta_kwh: (i > 0).then(|| r.kwh - self.readings[i - 1].kwh),
        })
    }

    /// Total energy consumed across the record set (last minus first
    /// cumulative value). Zero for fewer than two readings.
    pub fn total_kwh(&self) -> f64 {
        match (self.readings.first(), self.readings.last()) {
            (Some(first), Some(last)) => last.kwh - first.kwh,
            _ => 0.0,
        }
    }

    /// Trend summary over the record set, or `None` when fewer than two
    /// readings exist.
    pub fn summary(&self) -> Option<TrendSummary> {
        if self.readings.len() < 2 {
            return None;
        }
        let first = self.readings.first()?;
        let last = self.readings.last()?;
        let days = (last.ts - first.ts).as_seconds_f64() / 86_400.0;
        let total = last.kwh - first.kwh;
        Some(TrendSummary {
            from: first.ts,
            to: last.ts,
            total_kwh: total,
            days,
            avg_daily_kwh: if days > 0.0 { total / days } else { 0.0 },
        })
    }
}
