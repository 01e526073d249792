//! Observer: extracts observations from a message window

use crate::capability::{Capability, Extraction};
use observant_core::{Message, Observation, ObservationConfig, PriorityLevel, Role};
use std::sync::Arc;
use tracing::warn;

struct FallbackKeywords {
    priority: PriorityLevel,
    content: &'static str,
    keywords: &'static [&'static str],
}

// Scanned in order; the first matching set wins, so a message yields at most
// one observation.
const FALLBACK_KEYWORD_MAP: &[FallbackKeywords] = &[
    FallbackKeywords {
        priority: PriorityLevel::Red,
        content: "User mentioned family (children)",
        keywords: &["kids", "children", "family"],
    },
    FallbackKeywords {
        priority: PriorityLevel::Yellow,
        content: "User discussed work situation",
        keywords: &["work", "job", "career"],
    },
];

/// Extracts new observations from a message window, delegating semantic
/// judgment to the external capability when one is configured.
pub struct Observer {
    config: ObservationConfig,
    capability: Option<Arc<dyn Capability>>,
}

impl Observer {
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

    /// Extract observations, current task and suggested response.
    ///
    /// Never fails: a capability error or timeout falls back to the
    /// deterministic keyword extraction. Returns the extraction and whether
    /// the fallback was used.
    pub fn extract_observations(
        &self,
        messages: &[Message],
        prior_context: &str,
    ) -> (Extraction, bool) {
        if let Some(capability) = &self.capability {
            match capability.extract(messages, prior_context) {
                Ok(extraction) => return (extraction, false),
                Err(err) => {
                    warn!(error = %err, "extraction capability failed, using fallback");
                }
            }
        }

        (
            Extraction {
                observations: fallback_extract(messages),
                current_task: None,
                suggested_response: None,
            },
            true,
        )
    }
}

/// Deterministic keyword extraction over user-authored messages.
///
/// Lower fidelity than the capability contract by design: no referenced
/// timestamps, no task or suggestion, at most one observation per matched
/// message.
pub fn fallback_extract(messages: &[Message]) -> Vec<Observation> {
    let mut observations = Vec::new();

    for msg in messages {
        if msg.role != Role::User {
            continue;
        }
        let content = msg.content.to_lowercase();

        for entry in FALLBACK_KEYWORD_MAP {
            if entry.keywords.iter().any(|kw| content.contains(kw)) {
                observations.push(Observation::new(msg.timestamp, entry.priority, entry.content));
                break;
            }
        }
    }

    observations
}
