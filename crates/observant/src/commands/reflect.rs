use observant_memory::ReflectionOutcome;

pub fn run(thread: &str) -> anyhow::Result<()> {
    let controller = super::build_controller()?;

    match controller.force_reflection(thread)? {
        ReflectionOutcome::NothingToReflect => {
            println!("No memory record for thread '{thread}'");
        }
        ReflectionOutcome::Completed { total_observations } => {
            println!("Reflection complete: {total_observations} observations retained");
        }
    }
    Ok(())
}
