//! Persistence for the reading record set.
//!
//! The backing medium is swappable behind [`ReadingStore`], which is the
//! whole interface the rest of the service needs: append one record, load
//! them all. Concrete backends are a JSON array document, the original CSV
//! flat file, and an in-memory store for tests.

pub mod csv_file;
pub mod json_document;
pub mod memory;

pub use csv_file::CsvFileStore;
pub use json_document::JsonDocumentStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};

/// Exact on-disk record shape: a serialized timestamp and the cumulative
/// kWh value. Stored documents missing either field are rejected at this
/// boundary and never reach consumption derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReading {
    pub timestamp: String,
    pub reading: f64,
}

/// Result of reading the raw record set: every schema-valid document in
/// storage order, plus a count of documents rejected at the boundary.
#[derive(Debug, Default)]
pub struct RawRecords {
    pub records: Vec<StoredReading>,
    pub rejected: usize,
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("store I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("store payload is not a readable record set: {0}")]
    Corrupt(String),
    #[error("timestamp encoding: {0}")]
    Encode(#[from] time::error::Format),
}

#[async_trait::async_trait]
pub trait ReadingStore: Send + Sync {
    /// Durably add one record. Previously stored records are never dropped
    /// or reordered by an append. Single-writer assumption: two processes
    /// appending concurrently may race on read-modify-write backends.
    async fn append(&self, record: &StoredReading) -> Result<(), StoreError>;

    /// Return every schema-valid stored record. Fails as a whole on I/O
    /// errors rather than returning a silently truncated set.
    async fn load_all(&self) -> Result<RawRecords, StoreError>;
}
