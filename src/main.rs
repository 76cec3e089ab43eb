//! Ponder - decision journal analysis from the command line
//!
//! Tags journal text, checks value check-in histories for tension, and talks
//! a decision through with the coach.

mod cli;

use clap::{Parser, Subcommand};
use ponder_core::{error::Result, PonderConfig, TaggingMode};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(name = "ponder")]
#[command(about = "Decision journal analysis: tagging, value tension, coaching", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Set log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive domain, sentiment and keyword tags for an entry
    Tag {
        /// Entry title
        #[arg(short, long)]
        title: String,

        /// Entry context
        #[arg(short = 'x', long)]
        context: Option<String>,

        /// Tagging strategy (overrides configuration)
        #[arg(short, long)]
        mode: Option<TaggingMode>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Check a value check-in history for conflicts and rapid swings
    Tension {
        /// JSON file holding the check-in history
        history: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Ask the coach about a decision
    Chat {
        /// Message to send
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: cli::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    // Our own level for ponder, quiet HTTP internals
    let filter = EnvFilter::new(format!(
        "ponder={},ponder_core={},reqwest=warn,hyper=warn",
        level.as_str().to_lowercase(),
        level.as_str().to_lowercase()
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // Write logs to stderr, not stdout
        .init();

    debug!("Ponder v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = PonderConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Tag {
            title,
            context,
            mode,
            json,
        } => cli::tag::handle(config, title, context, mode, json).await,
        Commands::Tension { history, json } => cli::tension::handle(&config, &history, json),
        Commands::Chat { message } => cli::chat::handle(&config, message.join(" ")).await,
        Commands::Config { action } => cli::config::handle(&config, action),
    }
}
