mod cli;
mod commands;
mod store;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process { thread, file } => commands::process::run(&thread, file.as_deref()),
        Commands::Context { thread } => commands::context::run(&thread),
        Commands::Stats { thread } => commands::stats::run(&thread),
        Commands::Reflect { thread } => commands::reflect::run(&thread),
        Commands::Evaluate { thread, file } => commands::evaluate::run(&thread, file.as_deref()),
        Commands::History { stats } => commands::history::run(stats),
        Commands::Version => commands::version::run(),
    }
}
