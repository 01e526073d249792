pub mod context;
pub mod evaluate;
pub mod history;
pub mod process;
pub mod reflect;
pub mod stats;
pub mod version;

use crate::store::JsonStore;
use observant_core::{Message, ObservationConfig};
use observant_memory::{MemoryController, RemoteCapability};
use observant_telemetry::Paths;
use std::io::Read;
use std::sync::Arc;

/// Build a controller over the on-disk record store. An external capability
/// is attached only when OBSERVANT_API_KEY is set; otherwise the
/// deterministic fallbacks run.
pub(crate) fn build_controller() -> anyhow::Result<MemoryController> {
    let paths = Paths::new()?;
    let config = ObservationConfig::default();
    let mut controller =
        MemoryController::with_store(config.clone(), Box::new(JsonStore::new(paths)));

    if let Ok(api_key) = std::env::var("OBSERVANT_API_KEY") {
        let mut capability = RemoteCapability::new(api_key, config);
        if let Ok(model) = std::env::var("OBSERVANT_MODEL") {
            capability = capability.with_model(model);
        }
        if let Ok(endpoint) = std::env::var("OBSERVANT_ENDPOINT") {
            capability = capability.with_endpoint(endpoint);
        }
        controller = controller.with_capability(Arc::new(capability));
    }

    Ok(controller)
}

/// Read a JSON message array from a file, or stdin when no path is given
pub(crate) fn read_messages(file: Option<&str>) -> anyhow::Result<Vec<Message>> {
    let content = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let messages: Vec<Message> = serde_json::from_str(&content)?;
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use observant_core::Role;

    #[test]
    fn test_read_messages_from_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("messages.json");
        std::fs::write(
            &path,
            r#"[{"role": "user", "content": "hello", "timestamp": "2026-03-10T09:00:00Z"}]"#,
        )
        .unwrap();

        let messages = read_messages(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "hello");
    }

    #[test]
    fn test_read_messages_rejects_malformed_json() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("messages.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(read_messages(Some(path.to_str().unwrap())).is_err());
    }
}
