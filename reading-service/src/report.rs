//! Report assembly: load the record set, derive consumption, flag data
//! quality. Rendering proper (tables, charts) belongs to the caller; the
//! plain-text table here is what the CLI prints.

use reading_core::{timefmt, ConsumptionSeries};

use crate::ledger::ReadingLedger;
use crate::store::{ReadingStore, StoreError};

pub struct ConsumptionReport {
    pub series: ConsumptionSeries,
    /// Stored records skipped during load (schema or timestamp rejects).
    pub skipped: usize,
}

pub async fn build_report<S: ReadingStore>(
    ledger: &ReadingLedger<S>,
) -> Result<ConsumptionReport, StoreError> {
    let outcome = ledger.load().await?;
    let series = ConsumptionSeries::new(outcome.readings);

    // The meter register should never run backwards.
    let negative = series
        .samples()
        .filter(|s| s.delta_kwh.is_some_and(|d| d < 0.0))
        .count();
    if negative > 0 {
        tracing::warn!(
            count = negative,
            "negative consumption deltas found; cumulative readings should be non-decreasing"
        );
    }

    Ok(ConsumptionReport {
        series,
        skipped: outcome.skipped,
    })
}

impl ConsumptionReport {
    pub fn table_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.series.len() + 1);
        lines.push(format!(
            "{:<22} {:>12} {:>12}",
            "recorded at", "meter kWh", "used kWh"
        ));
        for (reading, sample) in self.series.readings().iter().zip(self.series.samples()) {
            let delta = sample
                .delta_kwh
                .map(|d| format!("{d:.2}"))
                .unwrap_or_else(|| "-".to_string());
            lines.push(format!(
                "{:<22} {:>12.2} {:>12}",
                timefmt::display(reading.ts),
                reading.kwh,
                delta
            ));
        }
        lines
    }
}
