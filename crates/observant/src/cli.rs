use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "observant")]
#[command(version)]
#[command(about = "Bounded observational memory for conversational agents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process a window of messages into a thread's memory
    Process {
        /// Thread identifier
        #[arg(short, long)]
        thread: String,

        /// Path to a JSON message array (stdin if omitted)
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Print a thread's rendered memory context
    Context {
        #[arg(short, long)]
        thread: String,
    },

    /// Show memory statistics for a thread
    Stats {
        #[arg(short, long)]
        thread: String,
    },

    /// Force a reflection pass for a thread, ignoring thresholds
    Reflect {
        #[arg(short, long)]
        thread: String,
    },

    /// Score how well a thread's memory preserves its conversation
    Evaluate {
        #[arg(short, long)]
        thread: String,

        /// Path to a JSON message array (stdin if omitted)
        #[arg(short, long)]
        file: Option<String>,
    },

    /// View processing history
    History {
        /// Show statistics summary
        #[arg(long)]
        stats: bool,
    },

    /// Print version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_version() {
        let cli = Cli::try_parse_from(["observant", "version"]);
        assert!(cli.is_ok());
        assert!(matches!(cli.unwrap().command, Commands::Version));
    }

    #[test]
    fn test_cli_parse_process() {
        let cli = Cli::try_parse_from([
            "observant",
            "process",
            "--thread",
            "t1",
            "--file",
            "messages.json",
        ]);
        assert!(cli.is_ok());
        if let Commands::Process { thread, file } = cli.unwrap().command {
            assert_eq!(thread, "t1");
            assert_eq!(file, Some("messages.json".to_string()));
        } else {
            panic!("Expected Process command");
        }
    }

    #[test]
    fn test_cli_parse_context_requires_thread() {
        assert!(Cli::try_parse_from(["observant", "context"]).is_err());
        assert!(Cli::try_parse_from(["observant", "context", "--thread", "t1"]).is_ok());
    }

    #[test]
    fn test_cli_parse_history_stats_flag() {
        let cli = Cli::try_parse_from(["observant", "history", "--stats"]).unwrap();
        assert!(matches!(cli.command, Commands::History { stats: true }));
    }
}
