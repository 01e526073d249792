//! Chunk-level credit assignment for memory quality
//!
//! Messages are partitioned into semantic chunks, and each chunk is scored
//! against the memory controller's rendered context. Credit is assigned over
//! chunks rather than individual messages, which gives a more stable
//! regression signal for long conversations.

pub mod chunker;
pub mod evaluator;

pub use chunker::{InteractionChunk, InteractionChunker, SemanticType};
pub use evaluator::{ChunkEvaluationResult, ChunkEvaluator};
