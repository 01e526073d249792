//! Telemetry record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A record capturing one memory compaction pass over a thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub thread_id: String,
    pub timestamp: DateTime<Utc>,
    pub new_messages: usize,
    pub message_tokens: usize,
    pub observation_tokens: usize,
    pub total_observations: usize,
    #[serde(default)]
    pub reflected: bool,
    #[serde(default)]
    pub used_fallback: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_record_roundtrip() {
        let record = ProcessRecord {
            thread_id: "thread-1".to_string(),
            timestamp: Utc::now(),
            new_messages: 4,
            message_tokens: 120,
            observation_tokens: 350,
            total_observations: 12,
            reflected: true,
            used_fallback: false,
        };

        let json = serde_json::to_string(&record).unwrap();
        let parsed: ProcessRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record.thread_id, parsed.thread_id);
        assert_eq!(record.observation_tokens, parsed.observation_tokens);
        assert!(parsed.reflected);
    }

    #[test]
    fn test_process_record_backwards_compatible() {
        let old_json = r#"{"thread_id":"t1","timestamp":"2025-01-01T00:00:00Z","new_messages":2,"message_tokens":50,"observation_tokens":80,"total_observations":3}"#;
        let parsed: ProcessRecord = serde_json::from_str(old_json).unwrap();
        assert!(!parsed.reflected);
        assert!(!parsed.used_fallback);
    }
}
