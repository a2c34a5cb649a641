use anyhow::{bail, Context, Result};
use reading_core::timefmt;
use reading_service::{
    config::{AppConfig, StoreKind},
    intake::{self, ClockEntry},
    ledger::ReadingLedger,
    observability, report,
    store::{CsvFileStore, JsonDocumentStore, RawRecords, ReadingStore, StoreError, StoredReading},
};
use time::macros::format_description;
use time::Date;

enum AnyStore {
    Json(JsonDocumentStore),
    Csv(CsvFileStore),
}

#[async_trait::async_trait]
impl ReadingStore for AnyStore {
    async fn append(&self, record: &StoredReading) -> Result<(), StoreError> {
        match self {
            Self::Json(s) => s.append(record).await,
            Self::Csv(s) => s.append(record).await,
        }
    }

    async fn load_all(&self) -> Result<RawRecords, StoreError> {
        match self {
            Self::Json(s) => s.load_all().await,
            Self::Csv(s) => s.load_all().await,
        }
    }
}

const USAGE: &str = "usage: reading-service <command>
  submit <kwh> <YYYY-MM-DD> <hh:mm AM|PM>   record a meter reading
  report                                    table of readings with consumption deltas
  trend                                     total and average daily consumption";

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    let cfg = AppConfig::load()?;
    let store = match cfg.store.kind {
        StoreKind::Json => AnyStore::Json(JsonDocumentStore::new(&cfg.store.path)),
        StoreKind::Csv => AnyStore::Csv(CsvFileStore::new(&cfg.store.path)),
    };
    let ledger = ReadingLedger::new(store);

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("submit") => {
            if args.len() < 5 {
                bail!("usage: reading-service submit <kwh> <YYYY-MM-DD> <hh:mm AM|PM>");
            }
            let kwh: f64 = args[2].parse().context("kwh must be a number")?;
            let date = Date::parse(&args[3], format_description!("[year]-[month]-[day]"))
                .context("date must be YYYY-MM-DD")?;
            // The clock may arrive as two shell words ("09:15 PM").
            let clock = ClockEntry::FreeText(args[4..].join(" "));

            let reading = intake::submit_reading(date, clock, kwh)?;
            ledger.record(&reading).await?;
            println!(
                "recorded {:.2} kWh at {}",
                reading.kwh,
                timefmt::display(reading.ts)
            );
        }
        Some("report") => {
            let report = report::build_report(&ledger).await?;
            if report.series.is_empty() {
                println!("no readings recorded yet");
            } else {
                for line in report.table_lines() {
                    println!("{line}");
                }
            }
            if report.skipped > 0 {
                eprintln!("note: {} stored reading(s) could not be parsed and were skipped", report.skipped);
            }
        }
        Some("trend") => {
            let report = report::build_report(&ledger).await?;
            match report.series.summary() {
                Some(summary) => {
                    println!(
                        "{} .. {}",
                        timefmt::display(summary.from),
                        timefmt::display(summary.to)
                    );
                    println!("total consumed: {:.2} kWh over {:.1} days", summary.total_kwh, summary.days);
                    println!("average: {:.2} kWh/day", summary.avg_daily_kwh);
                }
                None => println!("need at least two readings to derive a trend"),
            }
            if report.skipped > 0 {
                eprintln!("note: {} stored reading(s) could not be parsed and were skipped", report.skipped);
            }
        }
        _ => bail!("{USAGE}"),
    }

    Ok(())
}
