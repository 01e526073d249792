pub fn run(thread: &str) -> anyhow::Result<()> {
    let controller = super::build_controller()?;
    println!("{}", controller.get_context(thread));
    Ok(())
}
