use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Directory to place the downloaded series under
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Run with a visible browser window instead of headless
    #[arg(long)]
    pub no_headless: bool,

    /// WebDriver endpoint to connect to
    #[arg(long, value_name = "URL")]
    pub webdriver_url: Option<String>,

    /// Timeout for element and attribute waits (in seconds)
    #[arg(long, value_name = "SECONDS")]
    pub wait_timeout: Option<u64>,
}

impl CliArgs {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> Result<(), String> {
        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log level '{}'. Valid levels are: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }

        // Validate wait_timeout
        if self.wait_timeout == Some(0) {
            return Err("wait-timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}
