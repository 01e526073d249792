//! Per-thread memory lifecycle orchestration

use crate::capability::Capability;
use crate::observer::Observer;
use crate::reflector::Reflector;
use crate::store::{InMemoryStore, RecordStore};
use observant_core::{
    message_tokens, observation_tokens, Observation, ObservationConfig,
    ObservationalMemoryRecord,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

/// Sentinel returned by `get_context` for threads with no record
pub const NO_OBSERVATIONS: &str = "No observations yet.";

/// Statistics about a thread's memory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_observations: usize,
    pub has_current_task: bool,
}

/// Result of a forced reflection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReflectionOutcome {
    NothingToReflect,
    Completed { total_observations: usize },
}

/// Updated record plus details of one processing pass
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub record: ObservationalMemoryRecord,
    pub message_tokens: usize,
    pub observation_tokens: usize,
    pub reflected: bool,
    pub used_fallback: bool,
}

/// Orchestrates the observe/reflect lifecycle for all threads.
///
/// One controller is constructed explicitly per process or request scope and
/// passed by reference; there is no process-wide default. Writers for the
/// same thread id are serialized internally; distinct thread ids proceed in
/// parallel, sharing only the immutable config.
pub struct MemoryController {
    config: ObservationConfig,
    store: Box<dyn RecordStore>,
    observer: Observer,
    reflector: Reflector,
    thread_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl MemoryController {
    /// Create a controller with an in-memory store and no external capability
    pub fn new(config: ObservationConfig) -> Self {
        Self::with_store(config, Box::new(InMemoryStore::new()))
    }

    /// Create a controller over an external record store
    pub fn with_store(config: ObservationConfig, store: Box<dyn RecordStore>) -> Self {
        Self {
            observer: Observer::new(config.clone()),
            reflector: Reflector::new(config.clone()),
            config,
            store,
            thread_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Attach an external text-understanding capability, shared by the
    /// Observer and Reflector
    pub fn with_capability(mut self, capability: Arc<dyn Capability>) -> Self {
        self.observer = Observer::new(self.config.clone()).with_capability(capability.clone());
        self.reflector = Reflector::new(self.config.clone()).with_capability(capability);
        self
    }

    pub fn config(&self) -> &ObservationConfig {
        &self.config
    }

    fn thread_lock(&self, thread_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self
            .thread_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        locks
            .entry(thread_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Process new messages through the observe/reflect pipeline and return
    /// the updated record.
    pub fn process_messages(
        &self,
        thread_id: &str,
        messages: &[observant_core::Message],
    ) -> anyhow::Result<ObservationalMemoryRecord> {
        Ok(self.process_messages_detailed(thread_id, messages)?.record)
    }

    /// Same as `process_messages`, with pass details for telemetry.
    ///
    /// Tolerates repeated and overlapping windows; de-duplication against the
    /// prior context is part of the extraction contract. A capability failure
    /// never surfaces here — the deterministic fallback runs instead and the
    /// record is still updated.
    pub fn process_messages_detailed(
        &self,
        thread_id: &str,
        messages: &[observant_core::Message],
    ) -> anyhow::Result<ProcessOutcome> {
        let lock = self.thread_lock(thread_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut record = self
            .store
            .get(thread_id)
            .unwrap_or_else(ObservationalMemoryRecord::new);

        let msg_tokens = message_tokens(messages);
        if msg_tokens > self.config.observation_threshold {
            debug!(
                thread_id,
                msg_tokens,
                threshold = self.config.observation_threshold,
                "message window crossed observation threshold"
            );
        }

        let prior_context = render_record(&record);
        let (extraction, used_fallback) = self
            .observer
            .extract_observations(messages, &prior_context);

        record.merge_observations(extraction.observations);

        let mut obs_tokens = observation_tokens(&record.observations);
        let mut reflected = false;
        if obs_tokens > self.config.reflection_threshold {
            info!(
                thread_id,
                obs_tokens,
                threshold = self.config.reflection_threshold,
                "reflection threshold crossed, condensing observations"
            );
            record.observations = self.reflector.reflect(&record.observations);
            record.observations.sort_by_key(|o| o.anchor);
            obs_tokens = observation_tokens(&record.observations);
            reflected = true;
        }

        // Only non-empty values overwrite what is already known
        if let Some(task) = extraction.current_task.filter(|t| !t.is_empty()) {
            record.current_task = Some(task);
        }
        if let Some(suggestion) = extraction.suggested_response.filter(|s| !s.is_empty()) {
            record.suggested_response = Some(suggestion);
        }

        self.store.put(thread_id, record.clone())?;

        Ok(ProcessOutcome {
            record,
            message_tokens: msg_tokens,
            observation_tokens: obs_tokens,
            reflected,
            used_fallback,
        })
    }

    /// Render the thread's memory as deterministic context text.
    ///
    /// Observations are grouped by calendar date ascending; each renders as
    /// `* <symbol> (<HH:MM>) <content>`. The output is a stable contract for
    /// downstream prompt assembly.
    pub fn get_context(&self, thread_id: &str) -> String {
        match self.store.get(thread_id) {
            Some(record) => render_record(&record),
            None => NO_OBSERVATIONS.to_string(),
        }
    }

    /// Statistics for a thread; zero-value when no record exists
    pub fn get_stats(&self, thread_id: &str) -> MemoryStats {
        match self.store.get(thread_id) {
            Some(record) => MemoryStats {
                total_observations: record.observations.len(),
                has_current_task: record.current_task.is_some(),
            },
            None => MemoryStats::default(),
        }
    }

    /// Run the Reflector unconditionally, regardless of thresholds.
    ///
    /// A missing record is not an error: the outcome is `NothingToReflect`.
    pub fn force_reflection(&self, thread_id: &str) -> anyhow::Result<ReflectionOutcome> {
        let lock = self.thread_lock(thread_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let Some(mut record) = self.store.get(thread_id) else {
            return Ok(ReflectionOutcome::NothingToReflect);
        };

        record.observations = self.reflector.reflect(&record.observations);
        record.observations.sort_by_key(|o| o.anchor);
        let total = record.observations.len();
        self.store.put(thread_id, record)?;

        info!(thread_id, total, "forced reflection complete");
        Ok(ReflectionOutcome::Completed {
            total_observations: total,
        })
    }
}

/// Deterministic context rendering for a record
fn render_record(record: &ObservationalMemoryRecord) -> String {
    let mut context = format_observations(&record.observations);

    if let Some(suggestion) = &record.suggested_response {
        context.push_str(&format!("\n\n<Suggested Response>\n{}\n", suggestion));
    }
    if let Some(task) = &record.current_task {
        context.push_str(&format!("\n\n<Current Task>\n{}\n", task));
    }

    context
}

fn format_observations(observations: &[Observation]) -> String {
    if observations.is_empty() {
        return String::new();
    }

    // BTreeMap keeps dates ascending
    let mut grouped: std::collections::BTreeMap<chrono::NaiveDate, Vec<&Observation>> =
        std::collections::BTreeMap::new();
    for obs in observations {
        grouped.entry(obs.anchor.date_naive()).or_default().push(obs);
    }

    let mut lines = Vec::new();
    for (date, group) in &grouped {
        lines.push(format!("Date: {}", date.format("%Y-%m-%d")));
        for obs in group {
            let mut line = format!(
                "* {} ({}) {}",
                obs.priority.symbol(),
                obs.anchor.format("%H:%M"),
                obs.content
            );
            if let Some(referenced) = obs.referenced {
                line.push_str(&format!(" (refers to {})", referenced.format("%Y-%m-%d")));
            }
            lines.push(line);
        }
    }

    lines.join("\n")
}
