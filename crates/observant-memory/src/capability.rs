//! External text-understanding capability contract
//!
//! Semantic extraction and condensation are delegated behind a fixed
//! function-shaped contract: `(messages, context) -> (observations, task,
//! suggestion)` and `observations -> observations`. Any implementation
//! satisfies the same signature, whether it is the remote model client below
//! or the rule-based fallbacks in the observer/reflector modules.

use chrono::{DateTime, Utc};
use observant_core::{Message, MemoryError, Observation, ObservationConfig, PriorityLevel};
use serde::Deserialize;

const MAX_WINDOW_CHARS: usize = 24_000;

/// Result of an extraction pass over a message window
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub observations: Vec<Observation>,
    pub current_task: Option<String>,
    pub suggested_response: Option<String>,
}

/// Contract for the external text-understanding capability.
///
/// Implementations may fail or time out; callers recover with the
/// deterministic fallbacks and must never lose the update.
pub trait Capability: Send + Sync {
    /// Extract new observations from a message window, given the currently
    /// rendered memory context as prior knowledge.
    fn extract(&self, messages: &[Message], prior_context: &str) -> Result<Extraction, MemoryError>;

    /// Condense an observation set into a smaller one.
    fn condense(&self, observations: &[Observation]) -> Result<Vec<Observation>, MemoryError>;
}

/// Build the prompt for an extraction call.
///
/// The rules mirror the extraction contract: Red for explicit user-stated
/// facts/preferences/goals, Yellow for project and tool detail, Green for
/// minor or uncertain detail; every observation anchored to its source
/// message's timestamp; a referenced date only when a relative-time
/// expression resolves to an actual date.
pub fn build_extraction_prompt(messages: &[Message], prior_context: &str) -> String {
    let mut window = String::new();
    for msg in messages {
        let role = match msg.role {
            observant_core::Role::User => "user",
            observant_core::Role::Assistant => "assistant",
            observant_core::Role::System => "system",
        };
        window.push_str(&format!(
            "[{}] {}: {}\n",
            msg.timestamp.to_rfc3339(),
            role,
            msg.content
        ));
        if window.len() > MAX_WINDOW_CHARS {
            window.truncate(MAX_WINDOW_CHARS);
            break;
        }
    }

    format!(
        "You are the memory of an assistant; these observations are its only \
         record of past interactions.\n\
         Rules:\n\
         - Priority red: explicit user-stated facts, preferences, goals, critical context.\n\
         - Priority yellow: project details, tool results, derived information.\n\
         - Priority green: minor or uncertain detail.\n\
         - User assertions are authoritative; record questions as questions.\n\
         - Anchor every observation to its source message timestamp.\n\
         - Add a referenced date ONLY when a relative time expression \
         (\"yesterday\", \"next week\") resolves to an actual date. Never invent \
         one for vague phrasing (\"recently\", \"a while ago\").\n\
         Return JSON: {{\"observations\": [{{\"anchor\": \"<rfc3339>\", \
         \"referenced\": \"<rfc3339, optional>\", \"priority\": \"red|yellow|green\", \
         \"content\": \"...\"}}], \"current_task\": \"...\", \"suggested_response\": \"...\"}}\n\n\
         Existing observations:\n{}\n\nNew messages:\n{}",
        prior_context, window
    )
}

/// Build the prompt for a condensation call.
pub fn build_condensation_prompt(observations: &[Observation]) -> String {
    let mut listing = String::new();
    for obs in observations {
        listing.push_str(&format!(
            "[{}] {} {}\n",
            obs.anchor.to_rfc3339(),
            obs.priority.symbol(),
            obs.content
        ));
        if listing.len() > MAX_WINDOW_CHARS {
            listing.truncate(MAX_WINDOW_CHARS);
            break;
        }
    }

    format!(
        "Reorganize and streamline these memory observations.\n\
         Rules:\n\
         - Never drop red content without folding it into a retained item.\n\
         - Condense older observations more aggressively than recent ones.\n\
         - Preserve every temporal anchor present in the input.\n\
         - When items are dropped, add one red consolidation observation \
         summarizing the loss, anchored to the earliest original date.\n\
         Return JSON: {{\"observations\": [{{\"anchor\": \"<rfc3339>\", \
         \"referenced\": \"<rfc3339, optional>\", \"priority\": \"red|yellow|green\", \
         \"content\": \"...\"}}]}}\n\n{}",
        listing
    )
}

/// Remote capability backed by an Anthropic-style messages endpoint.
///
/// Requests are blocking with the configured timeout; any transport or
/// parse failure surfaces as `MemoryError::Capability` so callers can fall
/// back deterministically.
pub struct RemoteCapability {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    model: String,
    config: ObservationConfig,
}

impl RemoteCapability {
    pub fn new(api_key: impl Into<String>, config: ObservationConfig) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            endpoint: "https://api.anthropic.com/v1/messages".to_string(),
            api_key: api_key.into(),
            model: "claude-3-haiku-20240307".to_string(),
            config,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn complete(&self, prompt: &str, temperature: f32) -> Result<String, MemoryError> {
        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.config.capability_timeout)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&serde_json::json!({
                "model": self.model,
                "max_tokens": 2048,
                "temperature": temperature,
                "messages": [{"role": "user", "content": prompt}]
            }))
            .send()
            .map_err(|e| MemoryError::Capability(e.to_string()))?;

        let body: serde_json::Value = response
            .json()
            .map_err(|e| MemoryError::Capability(e.to_string()))?;

        body["content"][0]["text"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| MemoryError::Capability("response had no text content".to_string()))
    }
}

impl Capability for RemoteCapability {
    fn extract(&self, messages: &[Message], prior_context: &str) -> Result<Extraction, MemoryError> {
        let prompt = build_extraction_prompt(messages, prior_context);
        let text = self.complete(&prompt, self.config.extraction_temperature)?;
        parse_extraction(&text)
    }

    fn condense(&self, observations: &[Observation]) -> Result<Vec<Observation>, MemoryError> {
        let prompt = build_condensation_prompt(observations);
        let text = self.complete(&prompt, self.config.condensation_temperature)?;
        parse_condensation(&text)
    }
}

#[derive(Debug, Deserialize)]
struct WireObservation {
    anchor: DateTime<Utc>,
    #[serde(default)]
    referenced: Option<DateTime<Utc>>,
    priority: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct WireExtraction {
    #[serde(default)]
    observations: Vec<WireObservation>,
    #[serde(default)]
    current_task: Option<String>,
    #[serde(default)]
    suggested_response: Option<String>,
}

fn parse_priority(s: &str) -> Result<PriorityLevel, MemoryError> {
    match s {
        "red" => Ok(PriorityLevel::Red),
        "yellow" => Ok(PriorityLevel::Yellow),
        "green" => Ok(PriorityLevel::Green),
        other => Err(MemoryError::Capability(format!(
            "unknown priority level: {other}"
        ))),
    }
}

fn convert_observations(wire: Vec<WireObservation>) -> Result<Vec<Observation>, MemoryError> {
    wire.into_iter()
        .map(|w| {
            let mut obs = Observation::new(w.anchor, parse_priority(&w.priority)?, w.content);
            obs.referenced = w.referenced;
            Ok(obs)
        })
        .collect()
}

/// Parse the JSON payload of an extraction response
pub fn parse_extraction(text: &str) -> Result<Extraction, MemoryError> {
    let wire: WireExtraction =
        serde_json::from_str(text).map_err(|e| MemoryError::Capability(e.to_string()))?;

    Ok(Extraction {
        observations: convert_observations(wire.observations)?,
        current_task: wire.current_task.filter(|s| !s.is_empty()),
        suggested_response: wire.suggested_response.filter(|s| !s.is_empty()),
    })
}

/// Parse the JSON payload of a condensation response
pub fn parse_condensation(text: &str) -> Result<Vec<Observation>, MemoryError> {
    let wire: WireExtraction =
        serde_json::from_str(text).map_err(|e| MemoryError::Capability(e.to_string()))?;
    convert_observations(wire.observations)
}
