//! Sustainly CLI: the main entry point.
//!
//! Commands:
//! - `estimate`: Run the estimator over ad-hoc observations
//! - `seed`    : Load templates and refinement phrases into the store
//! - `log`     : Record a trigger event
//! - `report`  : Build the likelihood prompt for the latest period
//! - `prompt`  : Build a search or notification prompt
//! - `config`  : Show configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "sustainly",
    about = "Sustainly: sustainability likelihood estimates and LLM prompts",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate sustainability likelihood from observation counts
    Estimate {
        /// Attribute as NAME:SUSTAINABLE:UNSUSTAINABLE (repeatable, ordered)
        #[arg(short, long = "attr", value_name = "NAME:POS:NEG", required = true)]
        attrs: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load templates and refinement phrases into the store
    Seed {
        /// Seed file to load instead of the bundled templates
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Record a device trigger event
    Log {
        /// Trigger kind (charging, device-usage, network-usage, ...)
        #[arg(short, long)]
        trigger: String,

        /// sustainable or unsustainable
        #[arg(short, long)]
        polarity: String,

        /// Magnitude of the event
        #[arg(long, default_value_t = 1.0)]
        value: f64,
    },

    /// Build the likelihood report prompt for the period ending now
    Report {
        /// Override the configured period length
        #[arg(long)]
        days: Option<u32>,

        /// Print estimator outputs alongside the prompt as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build a search or notification prompt
    Prompt {
        #[command(subcommand)]
        kind: PromptKind,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum PromptKind {
    /// Web search on a free-form topic
    Search { topic: String },

    /// Web search on a fixed topic with a random refinement
    Category { topic: String },

    /// Notification for a device trigger
    Notify {
        trigger: String,
        #[arg(long, default_value_t = 1.0)]
        value: f64,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the default configuration
    Default,
    /// Print the configuration file path
    Path,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Estimate { attrs, json } => commands::estimate::run(&attrs, json)?,
        Commands::Seed { file } => commands::seed::run(file).await?,
        Commands::Log {
            trigger,
            polarity,
            value,
        } => commands::log::run(&trigger, &polarity, value).await?,
        Commands::Report { days, json } => commands::report::run(days, json).await?,
        Commands::Prompt { kind } => match kind {
            PromptKind::Search { topic } => commands::prompt::search(topic).await?,
            PromptKind::Category { topic } => commands::prompt::category(&topic).await?,
            PromptKind::Notify { trigger, value } => {
                commands::prompt::notify(&trigger, value).await?
            }
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show()?,
            ConfigAction::Default => commands::config_cmd::default()?,
            ConfigAction::Path => commands::config_cmd::path()?,
        },
    }

    Ok(())
}
