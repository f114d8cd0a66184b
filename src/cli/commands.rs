use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "knowall-site", version, about = "KnowAll.ai Site Server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the config file path globally
    #[arg(short, long, global = true, default_value = "config.yaml")]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve,

    /// Inspect recorded chat transcripts
    Logs {
        #[command(subcommand)]
        action: LogsAction,
    },
}

#[derive(Subcommand)]
pub enum LogsAction {
    /// List all recorded conversation turns
    List,

    /// Print a single conversation turn as JSON
    Show {
        /// The conversation ID to look up
        id: String,
    },
}
