//! Telemetry types and utilities for tracking memory compaction activity

mod io;
mod paths;
mod tokens;
mod types;

pub use io::{append_jsonl, atomic_write, read_jsonl};
pub use paths::Paths;
pub use tokens::estimate_tokens;
pub use types::ProcessRecord;
