use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sadhana_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "sadhana-cli", version, about = "Sadhana CLI")]
struct Cli {
    /// Path to the config file (default: ~/.config/sadhana/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mala bead counter
    Mala {
        #[command(subcommand)]
        action: commands::mala::MalaAction,
    },
    /// Meditation timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Practice calendar
    Calendar {
        #[command(subcommand)]
        action: commands::calendar::CalendarAction,
    },
    /// Mantra library
    Library {
        #[command(subcommand)]
        action: commands::library::LibraryAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    // Logs go to stderr so stdout stays machine-readable JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(Config::default_path);

    let result = match cli.command {
        Commands::Mala { action } => commands::mala::run(action, &config_path),
        Commands::Timer { action } => commands::timer::run(action, &config_path),
        Commands::Calendar { action } => commands::calendar::run(action),
        Commands::Library { action } => commands::library::run(action),
        Commands::Config { action } => commands::config::run(action, &config_path),
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
