//! Token-equivalent sizing over the data model

use crate::types::{Message, Observation};
use observant_telemetry::estimate_tokens;

/// Per-observation overhead for the rendered priority symbol, time prefix
/// and bullet formatting.
const OBSERVATION_OVERHEAD_TOKENS: usize = 8;

/// Token-equivalent size of a message window
pub fn message_tokens(messages: &[Message]) -> usize {
    messages.iter().map(|m| estimate_tokens(&m.content)).sum()
}

/// Token-equivalent size of an observation set, as it would render in context
pub fn observation_tokens(observations: &[Observation]) -> usize {
    observations
        .iter()
        .map(|o| estimate_tokens(&o.content) + OBSERVATION_OVERHEAD_TOKENS)
        .sum()
}
