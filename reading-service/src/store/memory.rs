use tokio::sync::Mutex;

use super::{RawRecords, ReadingStore, StoreError, StoredReading};

/// In-process store. Used by tests and as an ephemeral backend; nothing
/// survives the process.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<StoredReading>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload raw records, bypassing the append path. Handy for fixtures
    /// that need legacy or deliberately broken timestamps.
    pub async fn seed(&self, records: Vec<StoredReading>) {
        self.records.lock().await.extend(records);
    }
}

#[async_trait::async_trait]
impl ReadingStore for MemoryStore {
    async fn append(&self, record: &StoredReading) -> Result<(), StoreError> {
        self.records.lock().await.push(record.clone());
        Ok(())
    }

    async fn load_all(&self) -> Result<RawRecords, StoreError> {
        Ok(RawRecords {
            records: self.records.lock().await.clone(),
            rejected: 0,
        })
    }
}
