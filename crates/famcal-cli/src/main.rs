//! famcal: Family Calendar Terminal Client
//!
//! Main entry point for the famcal application.
//!
//! Usage:
//!   famcal               - Start the interactive REPL
//!   famcal --ask "..."   - Run one utterance through the assistant
//!   famcal --help        - Show help

mod cli;
mod commands;
mod error;

use famcal_core::Config;
use tracing_subscriber::EnvFilter;

/// Run mode
enum RunMode {
    /// Interactive REPL
    Repl,
    /// One-shot assistant call
    Ask(String),
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mode = parse_args();

    match mode {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("famcal {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting famcal...");
    tracing::info!("Backend: {}", config.api.base_url);

    let app = commands::App::new(config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize clients: {}", e))?;

    match mode {
        RunMode::Ask(prompt) => cli::run_ask(app, &prompt).await,
        RunMode::Repl => cli::run_repl(app).await,
        _ => Ok(()),
    }
}

/// Parse command line arguments
fn parse_args() -> RunMode {
    let args: Vec<String> = std::env::args().collect();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--ask" | "-a" => {
                let rest: Vec<String> = iter.cloned().collect();
                return RunMode::Ask(rest.join(" "));
            }
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-V" => return RunMode::Version,
            _ => {}
        }
    }

    RunMode::Repl
}

/// Print help message
fn print_help() {
    println!("famcal - family calendar terminal client");
    println!();
    println!("Usage:");
    println!("  famcal               Start the interactive REPL");
    println!("  famcal --ask \"...\"   Send one utterance to the assistant and exit");
    println!("  famcal --help        Show this help message");
    println!("  famcal --version     Show version");
    println!();
    println!("Environment Variables:");
    println!("  FAMCAL_API_URL              Backend base URL (default: http://localhost:8000)");
    println!("  FAMCAL_API_TIMEOUT_SECS     Request timeout (default: 30)");
    println!("  FAMCAL_GEOCODE_URL          Nominatim endpoint");
    println!("  FAMCAL_GEOCODE_DEBOUNCE_MS  Location lookup debounce (default: 500)");
    println!("  FAMCAL_SESSION_PATH         Saved session file (default: data/famcal-session.json)");
    println!();
    println!("Settings can also live in famcal.toml; environment variables win.");
}
