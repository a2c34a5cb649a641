//! One-shot migration of a legacy CSV reading store into the configured
//! canonical store. Every timestamp is decoded under the legacy rules and
//! re-encoded canonically; rows that match no supported encoding are
//! reported and left behind in the source file.

use anyhow::{bail, Result};
use reading_core::MeterReading;
use reading_service::{
    config::{AppConfig, StoreKind},
    ledger::ReadingLedger,
    observability,
    store::{CsvFileStore, JsonDocumentStore, ReadingStore},
};

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        bail!("usage: migrate_csv_store <legacy_csv_path>");
    }
    let source_path = &args[1];

    let cfg = AppConfig::load()?;
    if cfg.store.kind != StoreKind::Json {
        bail!("destination store must be a JSON document store; check the [store] config");
    }
    if cfg.store.path == *source_path {
        bail!("source and destination paths are the same file");
    }

    let source = CsvFileStore::new(source_path);
    let raw = source.load_all().await?;
    let total = raw.records.len() + raw.rejected;

    let ledger = ReadingLedger::new(JsonDocumentStore::new(&cfg.store.path));
    let mut migrated = 0usize;
    let mut skipped = raw.rejected;
    for record in raw.records {
        match reading_core::timefmt::decode(&record.timestamp) {
            Ok(ts) => {
                ledger
                    .record(&MeterReading::new(ts, record.reading))
                    .await?;
                migrated += 1;
            }
            Err(e) => {
                tracing::warn!(error = %e, timestamp = %record.timestamp, "leaving row behind");
                skipped += 1;
            }
        }
    }

    println!(
        "migrated {migrated} of {total} row(s) into {}; {skipped} skipped",
        cfg.store.path
    );
    Ok(())
}
