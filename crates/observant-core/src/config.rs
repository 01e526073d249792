//! Configuration for the memory pipeline

use crate::error::MemoryError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for observation extraction and reflection.
///
/// Immutable after construction; thresholds are token-equivalent counts and
/// must satisfy `0 < observation_threshold < reflection_threshold`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationConfig {
    /// New-message token size at which the Observer should have run
    pub observation_threshold: usize,

    /// Combined observation token size at which the Reflector fires
    pub reflection_threshold: usize,

    /// Sampling temperature for the extraction call
    pub extraction_temperature: f32,

    /// Sampling temperature for the condensation call
    pub condensation_temperature: f32,

    /// Timeout for the external capability call
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub capability_timeout: Duration,
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

impl ObservationConfig {
    /// Validate and construct a config. Fails fast on non-positive or
    /// mis-ordered thresholds, before any processing happens.
    pub fn new(
        observation_threshold: usize,
        reflection_threshold: usize,
    ) -> Result<Self, MemoryError> {
        if observation_threshold == 0 || reflection_threshold == 0 {
            return Err(MemoryError::Configuration(
                "thresholds must be positive".to_string(),
            ));
        }
        if observation_threshold >= reflection_threshold {
            return Err(MemoryError::Configuration(format!(
                "observation_threshold ({}) must be below reflection_threshold ({})",
                observation_threshold, reflection_threshold
            )));
        }

        Ok(Self {
            observation_threshold,
            reflection_threshold,
            extraction_temperature: 0.3,
            condensation_temperature: 0.0,
            capability_timeout: default_timeout(),
        })
    }

    pub fn with_temperatures(mut self, extraction: f32, condensation: f32) -> Self {
        self.extraction_temperature = extraction;
        self.condensation_temperature = condensation;
        self
    }

    pub fn with_capability_timeout(mut self, timeout: Duration) -> Self {
        self.capability_timeout = timeout;
        self
    }
}

impl Default for ObservationConfig {
    fn default() -> Self {
        // 30k observation / 40k reflection token windows
        Self::new(30_000, 40_000).expect("default thresholds are valid")
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}
