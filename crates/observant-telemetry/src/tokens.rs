//! Token estimation utilities

/// Estimate token count for a piece of conversational text.
///
/// Uses the ~4 chars/token heuristic for natural language. The estimate is
/// deterministic and non-decreasing in content length, which the threshold
/// checks depend on: adding text to a window can never lower its size.
pub fn estimate_tokens(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    text.len().div_ceil(4)
}
