use std::error::Error;
use std::io::{self, Write};

mod app;
mod cli;
mod config;
mod error;
mod progress;
mod scraping;
mod shutdown;
mod storage;

use app::App;
use cli::CliArgs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Parse CLI arguments
    let cli_args = CliArgs::parse_args();

    // Validate CLI arguments
    cli_args.validate()?;

    // Initialize logging with CLI log level
    let log_level = match cli_args.log_level.as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    tracing::info!("Starting fuzdl");

    // Scratch directory for the browser; missing it is survivable.
    let _ = std::fs::create_dir_all("/tmp");

    // Setup shutdown handling
    let shutdown_manager = shutdown::setup_shutdown_handler().await?;

    // Load configuration with CLI overrides
    let config = config::AppConfig::load_with_cli_args(&cli_args)?;

    let mut app = App::new(config);

    // Run to completion or interruption; failures are logged, not returned,
    // so the browser stays open for inspection behind the gate below.
    tokio::select! {
        result = app.run() => {
            match result {
                Ok(()) => tracing::info!("Download completed"),
                Err(e) => tracing::error!("Download failed: {}", e),
            }
        }
        _ = shutdown_manager.wait_for_shutdown() => {
            tracing::info!("Download interrupted");
        }
    }

    wait_for_operator_ack();

    if let Err(e) = app.close().await {
        tracing::warn!("Failed to close browser session: {}", e);
    }

    Ok(())
}

/// Blocks until the operator confirms teardown, so a failed run can be
/// inspected in the still-open browser first.
fn wait_for_operator_ack() {
    print!("Press Enter to close the browser ");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().read_line(&mut line);
}
