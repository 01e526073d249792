//! Data model for observational memory

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// A single conversation message with an absolute timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp,
        }
    }
}

/// Retention priority of an observation. Red is the highest: explicit user
/// facts, preferences, goals, critical context. Yellow covers project and
/// tool detail; Green is minor or uncertain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    Red,
    Yellow,
    Green,
}

impl PriorityLevel {
    /// Rendering symbol used in formatted context output
    pub fn symbol(&self) -> &'static str {
        match self {
            PriorityLevel::Red => "\u{1F534}",
            PriorityLevel::Yellow => "\u{1F7E1}",
            PriorityLevel::Green => "\u{1F7E2}",
        }
    }
}

/// A single dated, prioritized fact extracted from conversation history.
///
/// `anchor` is the timestamp of the source message and is always set.
/// `referenced` is set only when the content contains a relative-time
/// expression that resolves to an actual date ("last week", "tomorrow");
/// vague phrasing ("recently", "a while ago") never produces one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub anchor: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced: Option<DateTime<Utc>>,
    pub priority: PriorityLevel,
    pub content: String,
}

impl Observation {
    pub fn new(
        anchor: DateTime<Utc>,
        priority: PriorityLevel,
        content: impl Into<String>,
    ) -> Self {
        Self {
            anchor,
            referenced: None,
            priority,
            content: content.into(),
        }
    }

    /// Attach a resolved referenced date
    pub fn with_referenced(mut self, referenced: DateTime<Utc>) -> Self {
        self.referenced = Some(referenced);
        self
    }
}

/// Per-thread memory state. One record per thread id; created empty on the
/// first processing call and replaced wholesale on every update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObservationalMemoryRecord {
    /// Observations ordered by anchor timestamp
    pub observations: Vec<Observation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_response: Option<String>,
}

impl ObservationalMemoryRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge new observations, keeping anchor order. The sort is stable, so
    /// observations sharing an anchor keep their insertion order.
    pub fn merge_observations(&mut self, new: Vec<Observation>) {
        self.observations.extend(new);
        self.observations.sort_by_key(|o| o.anchor);
    }
}
