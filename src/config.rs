use config::{Config, Environment};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// Runtime configuration, layered as defaults -> environment -> CLI overrides.
///
/// `EMAIL`, `PASSWORD` and `SERIES_URL` come from the environment and are
/// required; everything else has a default.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct AppConfig {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
    #[validate(url(message = "Invalid series URL"))]
    pub series_url: String,
    #[validate(url(message = "Invalid WebDriver URL"))]
    pub webdriver_url: String,
    pub headless: bool,
    pub wait_timeout_secs: u64,
    pub output_dir: PathBuf,
}

impl AppConfig {
    pub fn load_with_cli_args(cli_args: &crate::cli::CliArgs) -> Result<Self, Box<dyn std::error::Error>> {
        let mut builder = Config::builder()
            .set_default("webdriver_url", "http://localhost:4444")?
            .set_default("headless", true)?
            .set_default("wait_timeout_secs", 10)?
            .set_default("output_dir", ".")?
            .add_source(Environment::default());

        // Override specific values from CLI args
        if let Some(output) = &cli_args.output {
            builder = builder.set_override("output_dir", output.to_string_lossy().as_ref())?;
        }
        if cli_args.no_headless {
            builder = builder.set_override("headless", false)?;
        }
        if let Some(url) = &cli_args.webdriver_url {
            builder = builder.set_override("webdriver_url", url.as_str())?;
        }
        if let Some(secs) = cli_args.wait_timeout {
            builder = builder.set_override("wait_timeout_secs", secs as i64)?;
        }

        let app_config: AppConfig = builder.build()?.try_deserialize()?;

        Validate::validate(&app_config).map_err(|e: validator::ValidationErrors| -> Box<dyn std::error::Error> {
            format!("Configuration validation failed: {}", e).into()
        })?;

        Ok(app_config)
    }
}
