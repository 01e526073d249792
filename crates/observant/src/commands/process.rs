use observant_telemetry::{append_jsonl, Paths, ProcessRecord};

pub fn run(thread: &str, file: Option<&str>) -> anyhow::Result<()> {
    let messages = super::read_messages(file)?;
    let controller = super::build_controller()?;

    let outcome = controller.process_messages_detailed(thread, &messages)?;

    let record = ProcessRecord {
        thread_id: thread.to_string(),
        timestamp: chrono::Utc::now(),
        new_messages: messages.len(),
        message_tokens: outcome.message_tokens,
        observation_tokens: outcome.observation_tokens,
        total_observations: outcome.record.observations.len(),
        reflected: outcome.reflected,
        used_fallback: outcome.used_fallback,
    };

    let paths = Paths::new()?;
    append_jsonl(&paths.process_file(), &record)?;

    let output = serde_json::json!({
        "thread": thread,
        "new_messages": record.new_messages,
        "message_tokens": record.message_tokens,
        "observation_tokens": record.observation_tokens,
        "total_observations": record.total_observations,
        "reflected": record.reflected,
        "used_fallback": record.used_fallback,
    });
    println!("{output}");
    Ok(())
}
