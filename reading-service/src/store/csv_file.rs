use std::fs::{File, OpenOptions};
use std::path::PathBuf;

use csv::StringRecord;

use super::{RawRecords, ReadingStore, StoreError, StoredReading};

/// Columns the store recognizes for each field. First the canonical name,
/// then the header written by the original flat-file version.
const TIMESTAMP_COLUMNS: [&str; 2] = ["timestamp", "Timestamp (IST)"];
const READING_COLUMNS: [&str; 2] = ["reading", "Reading (kWh)"];

/// The original flat-file store: a single CSV with a header row.
///
/// Legacy files with the `Timestamp (IST)` / `Reading (kWh)` header are read
/// and appended to in place, whatever their column order; new files get the
/// canonical `timestamp,reading` header. Appending writes one row at the end
/// of the file rather than rewriting the whole set, so malformed rows that
/// load-time rejects are still never dropped from disk.
pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

fn csv_error(e: csv::Error) -> StoreError {
    let message = e.to_string();
    match e.into_kind() {
        csv::ErrorKind::Io(io) => StoreError::Io(io),
        _ => StoreError::Corrupt(message),
    }
}

fn column_indices(headers: &StringRecord) -> Result<(usize, usize), StoreError> {
    let find = |names: &[&str]| headers.iter().position(|h| names.contains(&h.trim()));
    match (find(&TIMESTAMP_COLUMNS), find(&READING_COLUMNS)) {
        (Some(ts), Some(kwh)) => Ok((ts, kwh)),
        _ => Err(StoreError::Corrupt(format!(
            "unrecognized CSV header: {headers:?}"
        ))),
    }
}

// The store uses blocking file I/O inside the async trait methods. Record
// sets here are tiny (one row per meter reading); for large files this would
// move onto a blocking thread pool.
#[async_trait::async_trait]
impl ReadingStore for CsvFileStore {
    async fn append(&self, record: &StoredReading) -> Result<(), StoreError> {
        match File::open(&self.path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let mut wtr = csv::Writer::from_writer(File::create(&self.path)?);
                wtr.write_record(["timestamp", "reading"]).map_err(csv_error)?;
                wtr.write_record([record.timestamp.as_str(), &record.reading.to_string()])
                    .map_err(csv_error)?;
                wtr.flush()?;
                Ok(())
            }
            Ok(file) => {
                let mut rdr = csv::Reader::from_reader(file);
                let headers = rdr.headers().map_err(csv_error)?.clone();
                let (ts_idx, kwh_idx) = column_indices(&headers)?;
                drop(rdr);

                // Map our two fields into the existing header's column order.
                let mut row = vec![String::new(); headers.len()];
                row[ts_idx] = record.timestamp.clone();
                row[kwh_idx] = record.reading.to_string();

                let file = OpenOptions::new().append(true).open(&self.path)?;
                let mut wtr = csv::WriterBuilder::new()
                    .has_headers(false)
                    .from_writer(file);
                wtr.write_record(&row).map_err(csv_error)?;
                wtr.flush()?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn load_all(&self) -> Result<RawRecords, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(RawRecords::default())
            }
            Err(e) => return Err(e.into()),
        };

        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(file);
        let headers = rdr.headers().map_err(csv_error)?.clone();
        let (ts_idx, kwh_idx) = column_indices(&headers)?;

        let mut out = RawRecords::default();
        for result in rdr.records() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    tracing::warn!(error = %e, "rejecting unreadable CSV row");
                    out.rejected += 1;
                    continue;
                }
            };

            let timestamp = row.get(ts_idx).map(str::trim).unwrap_or("");
            let reading = row.get(kwh_idx).and_then(|v| v.trim().parse::<f64>().ok());
            match (timestamp.is_empty(), reading) {
                (false, Some(reading)) => out.records.push(StoredReading {
                    timestamp: timestamp.to_string(),
                    reading,
                }),
                _ => {
                    tracing::warn!(row = ?row, "rejecting CSV row with missing or malformed fields");
                    out.rejected += 1;
                }
            }
        }
        Ok(out)
    }
}
