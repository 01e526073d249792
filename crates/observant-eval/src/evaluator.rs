//! Chunk-level evaluation against rendered memory context

use crate::chunker::{InteractionChunk, InteractionChunker, SemanticType};
use observant_core::Message;
use observant_memory::MemoryController;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Score for one evaluated chunk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkEvaluationResult {
    pub chunk_id: String,
    /// `importance * reconstruction_quality`
    pub credit_assigned: f64,
    /// How well the rendered context preserves the chunk's content
    pub reconstruction_quality: f64,
    /// Fixed per-type relevance weight
    pub temporal_relevance: f64,
    pub overall_score: f64,
}

/// Scores how well the controller's rendered context preserves each chunk.
///
/// Decoupled from the compaction pipeline: the evaluator only reads the
/// rendered context, so it keeps working as a regression signal even when
/// the compaction internals change.
pub struct ChunkEvaluator<'a> {
    chunker: InteractionChunker,
    memory: &'a MemoryController,
}

impl<'a> ChunkEvaluator<'a> {
    pub fn new(memory: &'a MemoryController) -> Self {
        Self {
            chunker: InteractionChunker::default(),
            memory,
        }
    }

    pub fn with_chunker(mut self, chunker: InteractionChunker) -> Self {
        self.chunker = chunker;
        self
    }

    /// Evaluate a thread: per-chunk scores in sequence order plus the
    /// aggregate thread score in [0, 100]. Empty input yields `([], 0.0)`.
    pub fn evaluate_thread(
        &self,
        messages: &[Message],
        thread_id: &str,
    ) -> (Vec<ChunkEvaluationResult>, f64) {
        let chunks = self.chunker.chunk(messages, thread_id);
        let context = self.memory.get_context(thread_id);

        let results: Vec<ChunkEvaluationResult> = chunks
            .iter()
            .map(|chunk| evaluate_chunk(chunk, &context))
            .collect();

        let score = aggregate_score(&results, &chunks);
        (results, score)
    }
}

fn evaluate_chunk(chunk: &InteractionChunk, context: &str) -> ChunkEvaluationResult {
    let reconstruction_quality = reconstruction_quality(&chunk.text(), context);
    let temporal_relevance = temporal_relevance(chunk.semantic_type);
    let credit_assigned = chunk.importance * reconstruction_quality;
    let overall_score =
        0.5 * credit_assigned + 0.3 * temporal_relevance + 0.2 * reconstruction_quality;

    ChunkEvaluationResult {
        chunk_id: chunk.id.clone(),
        credit_assigned,
        reconstruction_quality,
        temporal_relevance,
        overall_score,
    }
}

/// Reconstruction quality of chunk text against rendered context.
///
/// Verbatim containment scores 1.0; otherwise word overlap scaled by 0.9,
/// so partial matches never reach the exact-match score. The discontinuity
/// at the boundary is intended. Empty chunk text is defined as 0.0.
pub fn reconstruction_quality(chunk_text: &str, context: &str) -> f64 {
    if chunk_text.is_empty() {
        return 0.0;
    }
    if context.contains(chunk_text) {
        return 1.0;
    }

    let chunk_words: HashSet<String> = chunk_text
        .to_lowercase()
        .split_whitespace()
        .map(String::from)
        .collect();
    if chunk_words.is_empty() {
        return 0.0;
    }
    let context_words: HashSet<String> = context
        .to_lowercase()
        .split_whitespace()
        .map(String::from)
        .collect();

    let overlap = chunk_words.intersection(&context_words).count() as f64;
    0.9 * (overlap / chunk_words.len() as f64)
}

// Questions from earlier in a conversation matter less than recent task
// execution and corrections.
fn temporal_relevance(semantic_type: SemanticType) -> f64 {
    match semantic_type {
        SemanticType::Task => 1.0,
        SemanticType::Correction => 0.9,
        SemanticType::Explanation => 0.7,
        SemanticType::Question => 0.5,
    }
}

/// Credit-weighted aggregate over the chunk set, scaled to [0, 100]
fn aggregate_score(results: &[ChunkEvaluationResult], chunks: &[InteractionChunk]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }

    let total_credit: f64 = results.iter().map(|r| r.credit_assigned).sum();
    let total_importance: f64 = chunks.iter().map(|c| c.importance).sum();

    if total_importance > 0.0 {
        (total_credit / total_importance) * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use observant_core::{ObservationConfig, Role};

    fn msg(content: &str) -> Message {
        Message::new(
            Role::User,
            content,
            Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap(),
        )
    }

    fn controller() -> MemoryController {
        MemoryController::new(ObservationConfig::default())
    }

    #[test]
    fn test_empty_thread_evaluates_to_zero() {
        let memory = controller();
        let evaluator = ChunkEvaluator::new(&memory);
        let (results, score) = evaluator.evaluate_thread(&[], "t");

        assert!(results.is_empty());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_reconstruction_quality_exact_match() {
        assert_eq!(reconstruction_quality("my kids", "noted: my kids today"), 1.0);
    }

    #[test]
    fn test_reconstruction_quality_partial_capped_below_exact() {
        let quality = reconstruction_quality("alpha beta gamma", "context has alpha only");
        assert!(quality > 0.0);
        assert!(quality <= 0.9);
        assert!((quality - 0.3).abs() < 1e-9); // 1/3 overlap * 0.9
    }

    #[test]
    fn test_reconstruction_quality_bounds() {
        for (chunk, context) in [
            ("", "anything"),
            ("word", ""),
            ("a b c d e", "a b c d e"),
            ("x y z", "completely different words"),
        ] {
            let quality = reconstruction_quality(chunk, context);
            assert!((0.0..=1.0).contains(&quality), "{quality} out of range");
        }
    }

    #[test]
    fn test_reconstruction_quality_empty_chunk_is_zero() {
        assert_eq!(reconstruction_quality("", "some context"), 0.0);
    }

    #[test]
    fn test_temporal_relevance_table() {
        assert_eq!(temporal_relevance(SemanticType::Task), 1.0);
        assert_eq!(temporal_relevance(SemanticType::Correction), 0.9);
        assert_eq!(temporal_relevance(SemanticType::Explanation), 0.7);
        assert_eq!(temporal_relevance(SemanticType::Question), 0.5);
    }

    #[test]
    fn test_overall_score_weights() {
        let memory = controller();
        let evaluator = ChunkEvaluator::new(&memory).with_chunker(InteractionChunker::new(1, 10));
        let (results, _) = evaluator.evaluate_thread(&[msg("build the parser")], "t");

        assert_eq!(results.len(), 1);
        let r = &results[0];
        let expected =
            0.5 * r.credit_assigned + 0.3 * r.temporal_relevance + 0.2 * r.reconstruction_quality;
        assert!((r.overall_score - expected).abs() < 1e-9);
        assert!((r.credit_assigned - 0.5 * r.reconstruction_quality).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_is_credit_weighted() {
        let memory = controller();
        memory
            .process_messages("t", &[msg("my kids visited")])
            .unwrap();

        let evaluator = ChunkEvaluator::new(&memory).with_chunker(InteractionChunker::new(2, 4));
        let messages: Vec<Message> = (0..8).map(|i| msg(&format!("filler text {i}"))).collect();
        let (results, score) = evaluator.evaluate_thread(&messages, "t");

        assert!(!results.is_empty());
        assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn test_fully_preserved_context_scores_100() {
        let memory = controller();
        let evaluator = ChunkEvaluator::new(&memory).with_chunker(InteractionChunker::new(1, 1));

        // The sentinel context itself: a chunk whose text appears verbatim
        // gets reconstruction 1.0 and therefore full credit.
        let messages = vec![msg("No observations yet.")];
        let (results, score) = evaluator.evaluate_thread(&messages, "missing");

        assert_eq!(results[0].reconstruction_quality, 1.0);
        assert!((score - 100.0).abs() < 1e-9);
    }
}
