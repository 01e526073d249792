//! Core types for observational memory

pub mod budget;
pub mod config;
pub mod error;
pub mod types;

pub use budget::{message_tokens, observation_tokens};
pub use config::ObservationConfig;
pub use error::MemoryError;
pub use types::{Message, Observation, ObservationalMemoryRecord, PriorityLevel, Role};
