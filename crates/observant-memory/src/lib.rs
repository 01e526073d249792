//! Observational memory: extraction, reflection and per-thread orchestration

pub mod capability;
pub mod controller;
pub mod observer;
pub mod reflector;
pub mod store;

pub use capability::{Capability, Extraction, RemoteCapability};
pub use controller::{
    MemoryController, MemoryStats, ProcessOutcome, ReflectionOutcome, NO_OBSERVATIONS,
};
pub use observer::Observer;
pub use reflector::Reflector;
pub use store::{InMemoryStore, RecordStore};
