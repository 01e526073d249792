//! JSONL append/read and atomic replacement for state files

use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Append one record as a JSON line, creating the file and its parent
/// directories on first use
pub fn append_jsonl<T: Serialize>(path: &Path, record: &T) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(record)?;
    writeln!(file, "{}", json)?;
    Ok(())
}

/// Read every parseable record from a JSONL file.
///
/// A missing file reads as empty. Blank and malformed lines are skipped, so
/// a line torn by a crashed writer never poisons the rest of the log.
pub fn read_jsonl<T: for<'de> Deserialize<'de>>(path: &Path) -> std::io::Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if let Ok(record) = serde_json::from_str(&line) {
            records.push(record);
        }
    }

    Ok(records)
}

/// Replace a file's contents via temp file + rename, so readers see either
/// the old bytes or the new bytes, never a partial write
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, data)?;
    std::fs::rename(temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProcessRecord;
    use chrono::{TimeZone, Utc};

    fn pass(thread: &str, observations: usize) -> ProcessRecord {
        ProcessRecord {
            thread_id: thread.to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap(),
            new_messages: 3,
            message_tokens: 40,
            observation_tokens: observations * 12,
            total_observations: observations,
            reflected: false,
            used_fallback: true,
        }
    }

    #[test]
    fn test_process_log_roundtrip() {
        let temp = tempfile::TempDir::new().unwrap();
        let log = temp.path().join("telemetry").join("process.jsonl");

        append_jsonl(&log, &pass("t1", 2)).unwrap();
        append_jsonl(&log, &pass("t2", 5)).unwrap();

        let records: Vec<ProcessRecord> = read_jsonl(&log).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].thread_id, "t1");
        assert_eq!(records[1].total_observations, 5);
    }

    #[test]
    fn test_read_jsonl_skips_torn_lines() {
        let temp = tempfile::TempDir::new().unwrap();
        let log = temp.path().join("process.jsonl");

        append_jsonl(&log, &pass("before", 1)).unwrap();
        // Simulate a writer that died mid-line, then a healthy append after
        let mut file = OpenOptions::new().append(true).open(&log).unwrap();
        writeln!(file, "{{\"thread_id\": \"torn").unwrap();
        writeln!(file).unwrap();
        drop(file);
        append_jsonl(&log, &pass("after", 1)).unwrap();

        let records: Vec<ProcessRecord> = read_jsonl(&log).unwrap();
        let threads: Vec<_> = records.iter().map(|r| r.thread_id.as_str()).collect();
        assert_eq!(threads, vec!["before", "after"]);
    }

    #[test]
    fn test_read_jsonl_missing_file_is_empty() {
        let temp = tempfile::TempDir::new().unwrap();
        let missing = temp.path().join("never-written.jsonl");
        let records: Vec<ProcessRecord> = read_jsonl(&missing).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_atomic_write_replaces_previous_content() {
        let temp = tempfile::TempDir::new().unwrap();
        let record_file = temp.path().join("records").join("t1.json");

        atomic_write(&record_file, b"{\"observations\": []}").unwrap();
        atomic_write(&record_file, b"{\"observations\": [1]}").unwrap();

        let content = std::fs::read_to_string(&record_file).unwrap();
        assert_eq!(content, "{\"observations\": [1]}");
        // The temp sibling must not linger after the rename
        assert!(!record_file.with_extension("tmp").exists());
    }
}
