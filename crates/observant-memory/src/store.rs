//! Record storage contract and in-memory implementation
//!
//! Durable persistence is an external collaborator; the contract is
//! get/put by thread id with read-your-writes consistency per thread. The
//! record is always replaced as a whole, never mutated field-by-field, so
//! readers observe a fully-consistent pre- or post-update snapshot.

use observant_core::ObservationalMemoryRecord;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Storage contract for per-thread memory records
pub trait RecordStore: Send + Sync {
    /// Fetch the record for a thread, if one exists
    fn get(&self, thread_id: &str) -> Option<ObservationalMemoryRecord>;

    /// Replace the record for a thread atomically
    fn put(&self, thread_id: &str, record: ObservationalMemoryRecord) -> anyhow::Result<()>;
}

/// In-memory store for library use and tests
#[derive(Default)]
pub struct InMemoryStore {
    records: RwLock<HashMap<String, ObservationalMemoryRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for InMemoryStore {
    fn get(&self, thread_id: &str) -> Option<ObservationalMemoryRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(thread_id)
            .cloned()
    }

    fn put(&self, thread_id: &str, record: ObservationalMemoryRecord) -> anyhow::Result<()> {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(thread_id.to_string(), record);
        Ok(())
    }
}
