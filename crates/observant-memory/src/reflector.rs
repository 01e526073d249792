//! Reflector: condenses an observation set that has grown past its budget

use crate::capability::Capability;
use observant_core::{Observation, ObservationConfig, PriorityLevel};
use std::sync::Arc;
use tracing::warn;

/// Condenses observations when they grow too large, delegating to the
/// external capability when one is configured.
pub struct Reflector {
    config: ObservationConfig,
    capability: Option<Arc<dyn Capability>>,
}

impl Reflector {
    pub fn new(config: ObservationConfig) -> Self {
        Self {
            config,
            capability: None,
        }
    }

    pub fn with_capability(mut self, capability: Arc<dyn Capability>) -> Self {
        self.capability = Some(capability);
        self
    }

    pub fn config(&self) -> &ObservationConfig {
        &self.config
    }

    /// Reflect and condense observations.
    ///
    /// Never fails: a capability error or timeout falls back to the
    /// deterministic priority filter.
    pub fn reflect(&self, observations: &[Observation]) -> Vec<Observation> {
        if let Some(capability) = &self.capability {
            match capability.condense(observations) {
                Ok(condensed) => return condensed,
                Err(err) => {
                    warn!(error = %err, "condensation capability failed, using fallback");
                }
            }
        }

        fallback_condense(observations)
    }
}

/// Deterministic condensation: keep red and yellow, drop green, and append
/// one synthesized red observation stating how many were preserved, anchored
/// to the earliest original date.
///
/// Intentionally weaker than the capability contract: dropped content is
/// removed, not merged.
pub fn fallback_condense(observations: &[Observation]) -> Vec<Observation> {
    let mut condensed: Vec<Observation> = observations
        .iter()
        .filter(|o| matches!(o.priority, PriorityLevel::Red | PriorityLevel::Yellow))
        .cloned()
        .collect();

    if !condensed.is_empty() {
        let earliest = observations
            .iter()
            .map(|o| o.anchor)
            .min()
            .unwrap_or_else(chrono::Utc::now);
        condensed.push(Observation::new(
            earliest,
            PriorityLevel::Red,
            format!(
                "Memory consolidated: {} key observations preserved",
                condensed.len()
            ),
        ));
    }

    condensed
}
