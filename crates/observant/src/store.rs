//! Durable JSON record store backed by per-thread files

use observant_core::ObservationalMemoryRecord;
use observant_memory::RecordStore;
use observant_telemetry::{atomic_write, Paths};

/// One JSON file per thread under the records directory. Writes go through
/// temp-file-plus-rename, so a reader never sees a partially written record.
pub struct JsonStore {
    paths: Paths,
}

impl JsonStore {
    pub fn new(paths: Paths) -> Self {
        Self { paths }
    }
}

impl RecordStore for JsonStore {
    fn get(&self, thread_id: &str) -> Option<ObservationalMemoryRecord> {
        let path = self.paths.record_path(thread_id);
        let content = std::fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn put(&self, thread_id: &str, record: ObservationalMemoryRecord) -> anyhow::Result<()> {
        let path = self.paths.record_path(thread_id);
        let json = serde_json::to_vec_pretty(&record)?;
        atomic_write(&path, &json)?;
        Ok(())
    }
}
