//! The reading ledger: the explicit handle callers go through to persist
//! and reload readings. Constructed once at startup around whichever store
//! backend the configuration selects.

use reading_core::{timefmt, MeterReading};

use crate::store::{ReadingStore, StoreError, StoredReading};

/// Outcome of loading the record set: fully reconstructed readings plus the
/// number of stored records that had to be skipped (schema rejects and
/// timestamps matching no supported encoding).
#[derive(Debug)]
pub struct LoadOutcome {
    pub readings: Vec<MeterReading>,
    pub skipped: usize,
}

pub struct ReadingLedger<S> {
    store: S,
}

impl<S: ReadingStore> ReadingLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Encode the instant canonically and append one record.
    pub async fn record(&self, reading: &MeterReading) -> Result<(), StoreError> {
        let record = StoredReading {
            timestamp: timefmt::encode(reading.ts)?,
            reading: reading.kwh,
        };
        self.store.append(&record).await
    }

    /// Load every stored record and rebuild its instant. A record whose
    /// timestamp cannot be decoded under any supported encoding is skipped
    /// and counted; the rest of the set still loads. I/O failure fails the
    /// whole call.
    pub async fn load(&self) -> Result<LoadOutcome, StoreError> {
        let raw = self.store.load_all().await?;
        let mut readings = Vec::with_capacity(raw.records.len());
        let mut skipped = raw.rejected;

        for record in raw.records {
            match timefmt::decode(&record.timestamp) {
                Ok(ts) => readings.push(MeterReading::new(ts, record.reading)),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping stored reading with unparseable timestamp");
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            tracing::warn!(skipped, "stored readings were skipped during load");
        }
        Ok(LoadOutcome { readings, skipped })
    }
}
