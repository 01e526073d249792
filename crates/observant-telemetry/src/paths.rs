//! Path resolution for memory and telemetry files

use std::path::PathBuf;

/// Resolves standard paths for observant state files
#[derive(Debug, Clone)]
pub struct Paths {
    pub home_observant: PathBuf,
}

impl Paths {
    /// Create a new Paths resolver rooted at the user's home directory
    pub fn new() -> std::io::Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found")
        })?;

        Ok(Self {
            home_observant: home.join(".observant"),
        })
    }

    /// Get telemetry directory path
    pub fn telemetry_dir(&self) -> PathBuf {
        self.home_observant.join("telemetry")
    }

    /// Get process.jsonl path (one record per process_messages call)
    pub fn process_file(&self) -> PathBuf {
        self.telemetry_dir().join("process.jsonl")
    }

    /// Get memory records directory path
    pub fn records_dir(&self) -> PathBuf {
        self.home_observant.join("records")
    }

    /// Get the record file for a thread id
    pub fn record_path(&self, thread_id: &str) -> PathBuf {
        let safe = thread_id.replace(['/', '.'], "-");
        self.records_dir().join(format!("{}.json", safe))
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().expect("HOME directory must be set")
    }
}
