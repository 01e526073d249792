pub fn run(thread: &str) -> anyhow::Result<()> {
    let controller = super::build_controller()?;
    let stats = controller.get_stats(thread);

    let output = serde_json::json!({
        "thread": thread,
        "total_observations": stats.total_observations,
        "has_current_task": stats.has_current_task,
    });
    println!("{output}");
    Ok(())
}
