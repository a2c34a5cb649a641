use std::path::PathBuf;

use serde_json::Value;
use tokio::fs;

use super::{RawRecords, ReadingStore, StoreError, StoredReading};

/// Record set kept as a single JSON array document on disk.
///
/// Append is read-modify-write of the whole document, which is fine under
/// the single-writer model; a store with atomic single-record inserts is the
/// upgrade path if concurrent writers ever appear.
pub struct JsonDocumentStore {
    path: PathBuf,
}

impl JsonDocumentStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    async fn read_documents(&self) -> Result<Vec<Value>, StoreError> {
        match fs::read_to_string(&self.path).await {
            Ok(text) if text.trim().is_empty() => Ok(Vec::new()),
            Ok(text) => {
                serde_json::from_str(&text).map_err(|e| StoreError::Corrupt(e.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait::async_trait]
impl ReadingStore for JsonDocumentStore {
    async fn append(&self, record: &StoredReading) -> Result<(), StoreError> {
        let mut documents = self.read_documents().await?;
        let doc =
            serde_json::to_value(record).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        documents.push(doc);

        let payload = serde_json::to_string_pretty(&documents)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        fs::write(&self.path, payload).await?;
        Ok(())
    }

    async fn load_all(&self) -> Result<RawRecords, StoreError> {
        let documents = self.read_documents().await?;
        let mut out = RawRecords::default();
        for doc in documents {
            match serde_json::from_value::<StoredReading>(doc) {
                Ok(record) => out.records.push(record),
                Err(e) => {
                    tracing::warn!(error = %e, "rejecting stored document with missing or malformed fields");
                    out.rejected += 1;
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(timestamp: &str, reading: f64) -> StoredReading {
        StoredReading {
            timestamp: timestamp.to_string(),
            reading,
        }
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDocumentStore::new(dir.path().join("readings.json"));
        let raw = store.load_all().await.unwrap();
        assert!(raw.records.is_empty());
        assert_eq!(raw.rejected, 0);
    }

    #[tokio::test]
    async fn append_then_load_returns_records_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDocumentStore::new(dir.path().join("readings.json"));

        store
            .append(&record("2025-06-01T10:00:00+05:30", 10.0))
            .await
            .unwrap();
        store
            .append(&record("2025-06-02T10:00:00+05:30", 15.5))
            .await
            .unwrap();

        let raw = store.load_all().await.unwrap();
        assert_eq!(raw.records.len(), 2);
        assert_eq!(raw.records[0].reading, 10.0);
        assert_eq!(raw.records[1].timestamp, "2025-06-02T10:00:00+05:30");
    }

    #[tokio::test]
    async fn documents_missing_a_field_are_rejected_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readings.json");
        std::fs::write(
            &path,
            r#"[
                {"timestamp": "2025-06-01T10:00:00+05:30", "reading": 10.0},
                {"timestamp": "2025-06-02T10:00:00+05:30"},
                {"reading": 12.0}
            ]"#,
        )
        .unwrap();

        let store = JsonDocumentStore::new(path);
        let raw = store.load_all().await.unwrap();
        assert_eq!(raw.records.len(), 1);
        assert_eq!(raw.rejected, 2);
    }

    #[tokio::test]
    async fn corrupt_top_level_payload_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readings.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = JsonDocumentStore::new(path);
        assert!(matches!(
            store.load_all().await,
            Err(StoreError::Corrupt(_))
        ));
    }

    #[tokio::test]
    async fn fifty_sequential_appends_all_survive() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDocumentStore::new(dir.path().join("readings.json"));

        for i in 0..50 {
            store
                .append(&record(&format!("2025-06-01T10:{i:02}:00+05:30"), i as f64))
                .await
                .unwrap();
        }

        let raw = store.load_all().await.unwrap();
        assert_eq!(raw.records.len(), 50);
        for (i, rec) in raw.records.iter().enumerate() {
            assert_eq!(rec.reading, i as f64);
        }
    }
}
