mod common;

use common::user;
use observant_core::ObservationConfig;
use observant_eval::{ChunkEvaluator, InteractionChunker, SemanticType};
use observant_memory::MemoryController;

#[test]
fn test_evaluate_thread_after_processing() {
    let memory = MemoryController::new(ObservationConfig::default());
    let messages = vec![
        user("my kids start school next week", 10, 9, 0),
        user("my job has been hectic", 10, 9, 1),
        user("can you help me plan the week?", 10, 9, 2),
    ];
    memory.process_messages("t1", &messages).unwrap();

    let evaluator = ChunkEvaluator::new(&memory);
    let (results, score) = evaluator.evaluate_thread(&messages, "t1");

    assert!(!results.is_empty());
    assert!((0.0..=100.0).contains(&score));
    for result in &results {
        assert!((0.0..=1.0).contains(&result.reconstruction_quality));
        assert!(result.credit_assigned <= 1.0);
        assert!(result.overall_score > 0.0);
    }
}

#[test]
fn test_unprocessed_thread_scores_low() {
    let memory = MemoryController::new(ObservationConfig::default());
    let messages: Vec<_> = (0..6)
        .map(|i| user(&format!("discussing quarterly budget figures {i}"), 10, 9, i))
        .collect();

    // Nothing was processed for this thread: the context is the sentinel and
    // shares no vocabulary with the conversation.
    let evaluator = ChunkEvaluator::new(&memory).with_chunker(InteractionChunker::new(3, 5));
    let (results, score) = evaluator.evaluate_thread(&messages, "cold");

    assert!(score < 50.0);
    for result in &results {
        assert!(result.reconstruction_quality < 0.5);
    }
}

#[test]
fn test_chunk_results_align_with_chunker_output() {
    let memory = MemoryController::new(ObservationConfig::default());
    let chunker = InteractionChunker::new(3, 5);
    let messages: Vec<_> = (0..12)
        .map(|i| user(&format!("message number {i}"), 10, 9, i))
        .collect();

    let chunks = chunker.chunk(&messages, "t1");
    let evaluator = ChunkEvaluator::new(&memory).with_chunker(chunker);
    let (results, _) = evaluator.evaluate_thread(&messages, "t1");

    assert_eq!(results.len(), chunks.len());
    for (result, chunk) in results.iter().zip(&chunks) {
        assert_eq!(result.chunk_id, chunk.id);
    }
}

#[test]
fn test_task_chunks_carry_highest_temporal_relevance() {
    let memory = MemoryController::new(ObservationConfig::default());
    let evaluator = ChunkEvaluator::new(&memory).with_chunker(InteractionChunker::new(1, 2));

    // The semantic shift after the first message snaps the boundary, so the
    // question stands alone and the two task messages share a chunk.
    let messages = vec![
        user("how does the pipeline behave?", 10, 9, 0),
        user("implement the missing branch", 10, 9, 5),
        user("build the adapter next", 10, 9, 6),
    ];
    let (results, _) = evaluator.evaluate_thread(&messages, "t1");
    assert_eq!(results.len(), 2);

    // Question chunk then task chunk
    assert_eq!(results[0].temporal_relevance, 0.5);
    assert_eq!(results[1].temporal_relevance, 1.0);

    let chunks = InteractionChunker::new(1, 2).chunk(&messages, "t1");
    assert_eq!(chunks[0].semantic_type, SemanticType::Question);
    assert_eq!(chunks[1].semantic_type, SemanticType::Task);
}
