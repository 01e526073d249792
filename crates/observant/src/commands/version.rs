pub fn run() -> anyhow::Result<()> {
    println!("observant {}", env!("CARGO_PKG_VERSION"));
    println!("Bounded observational memory for conversational agents");
    Ok(())
}
