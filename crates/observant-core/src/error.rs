//! Error types for the memory pipeline

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MemoryError {
    /// Thresholds non-positive or mis-ordered. Raised at construction,
    /// before any processing.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The external extraction/condensation call failed or timed out.
    /// Recovered locally via the deterministic fallback; callers of
    /// `process_messages` never see this.
    #[error("external capability failed: {0}")]
    Capability(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MemoryError::Configuration("thresholds must be positive".to_string());
        assert!(err.to_string().contains("invalid configuration"));

        let err = MemoryError::Capability("request timed out".to_string());
        assert!(err.to_string().contains("timed out"));
    }
}
