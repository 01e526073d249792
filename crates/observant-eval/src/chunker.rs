//! Semantic interaction chunking

use chrono::{DateTime, Utc};
use observant_core::Message;
use serde::{Deserialize, Serialize};

/// Semantic type of a chunk of interactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    Question,
    Explanation,
    Correction,
    Task,
}

struct SemanticKeywords {
    semantic_type: SemanticType,
    keywords: &'static [&'static str],
}

// Declaration order breaks classification ties
const SEMANTIC_KEYWORD_MAP: &[SemanticKeywords] = &[
    SemanticKeywords {
        semantic_type: SemanticType::Question,
        keywords: &["?", "how", "what", "why", "can you", "help"],
    },
    SemanticKeywords {
        semantic_type: SemanticType::Explanation,
        keywords: &["because", "since", "the reason", "as a result"],
    },
    SemanticKeywords {
        semantic_type: SemanticType::Correction,
        keywords: &["no", "actually", "that's wrong", "not exactly"],
    },
    SemanticKeywords {
        semantic_type: SemanticType::Task,
        keywords: &["do this", "create", "write", "build", "implement"],
    },
];

/// A contiguous block of messages treated as one semantic unit.
/// Read-only once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionChunk {
    pub id: String,
    pub start_idx: usize,
    /// Exclusive
    pub end_idx: usize,
    pub messages: Vec<Message>,
    pub semantic_type: SemanticType,
    /// Recency-based, in [0.5, 1.0]
    pub importance: f64,
    pub created_at: DateTime<Utc>,
}

impl InteractionChunk {
    /// Concatenated chunk content
    pub fn text(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Partitions a message sequence into semantic chunks with boundary
/// detection. Chunks tile the sequence exactly: no gaps, no overlaps.
#[derive(Debug, Clone)]
pub struct InteractionChunker {
    min_chunk_size: usize,
    max_chunk_size: usize,
}

impl InteractionChunker {
    pub fn new(min_chunk_size: usize, max_chunk_size: usize) -> Self {
        let min = min_chunk_size.max(1);
        Self {
            min_chunk_size: min,
            max_chunk_size: max_chunk_size.max(min),
        }
    }

    pub fn min_chunk_size(&self) -> usize {
        self.min_chunk_size
    }

    pub fn max_chunk_size(&self) -> usize {
        self.max_chunk_size
    }

    /// Chunk messages into semantic interaction units
    pub fn chunk(&self, messages: &[Message], thread_id: &str) -> Vec<InteractionChunk> {
        let total = messages.len();
        let mut chunks = Vec::new();
        let mut i = 0;

        while i < total {
            let size = self.boundary_size(messages, i);
            let end = (i + size).min(total);
            let chunk_messages = messages[i..end].to_vec();

            chunks.push(InteractionChunk {
                id: format!("{}_chunk_{}", thread_id, chunks.len()),
                start_idx: i,
                end_idx: end,
                semantic_type: classify(&chunk_messages),
                importance: importance(i, total),
                messages: chunk_messages,
                created_at: Utc::now(),
            });

            i = end;
        }

        chunks
    }

    /// Candidate size from the current index, snapped back to the first
    /// semantic boundary that still leaves at least min_chunk_size messages.
    ///
    /// The scan is a single forward pass bounded by the candidate size, not a
    /// general pattern search.
    fn boundary_size(&self, messages: &[Message], start: usize) -> usize {
        let remaining = messages.len() - start;
        let candidate = self.max_chunk_size.min(self.min_chunk_size.max(remaining));

        if start + candidate < messages.len() {
            let first_type = classify(&messages[start..start + 1]);
            for j in (start + 1)..(start + candidate) {
                let next_type = classify(&messages[j..j + 1]);
                if next_type != first_type && j - start >= self.min_chunk_size {
                    return j - start;
                }
            }
        }

        candidate
    }
}

impl Default for InteractionChunker {
    fn default() -> Self {
        Self::new(3, 10)
    }
}

/// Classify the semantic type of a message block.
///
/// Counts keyword matches over the concatenated lower-cased text; the
/// highest-scoring category wins, ties resolved by declaration order.
/// Defaults to Task for empty input or when nothing matches.
pub fn classify(messages: &[Message]) -> SemanticType {
    if messages.is_empty() {
        return SemanticType::Task;
    }

    let text = messages
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let mut best: Option<(SemanticType, usize)> = None;
    for entry in SEMANTIC_KEYWORD_MAP {
        let count = entry.keywords.iter().filter(|kw| text.contains(*kw)).count();
        if count > 0 && best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((entry.semantic_type, count));
        }
    }

    best.map(|(t, _)| t).unwrap_or(SemanticType::Task)
}

// Recency-weighted: the earliest chunk sits at 0.5, the latest approaches
// 1.0, and importance never decreases along the sequence.
fn importance(start_idx: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.5;
    }
    0.5 + 0.5 * (start_idx as f64 / total as f64)
}
