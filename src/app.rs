use std::time::Duration;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::progress::Progress;
use crate::scraping::{Scraper, WaitPolicy, WebDriver};
use crate::storage::PageWriter;

pub struct App {
    config: AppConfig,
    progress: Progress,
    scraper: Option<Scraper<WebDriver>>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            progress: Progress::new(),
            scraper: None,
        }
    }

    pub async fn run(&mut self) -> Result<(), AppError> {
        self.initialize_browser().await?;
        self.login().await?;
        self.download_series().await?;
        self.progress.complete("Download complete");
        Ok(())
    }

    async fn initialize_browser(&mut self) -> Result<(), AppError> {
        self.progress.start("Connecting to browser");

        let driver =
            WebDriver::connect(&self.config.webdriver_url, self.config.headless).await?;
        let wait = WaitPolicy::with_timeout(Duration::from_secs(self.config.wait_timeout_secs));

        self.scraper = Some(Scraper::new(
            driver,
            wait,
            PageWriter,
            self.config.output_dir.clone(),
        ));
        Ok(())
    }

    async fn login(&mut self) -> Result<(), AppError> {
        self.progress.update("Logging in");

        if let Some(scraper) = &mut self.scraper {
            scraper.login(&self.config.email, &self.config.password).await?;
        }
        Ok(())
    }

    async fn download_series(&mut self) -> Result<(), AppError> {
        self.progress.update("Downloading series");

        if let Some(scraper) = &mut self.scraper {
            scraper.download_series(&self.config.series_url).await?;
        }
        Ok(())
    }

    /// Tears the browser session down. Called after the operator
    /// acknowledgment gate, whether or not the run succeeded.
    pub async fn close(&mut self) -> Result<(), AppError> {
        self.progress.abandon();
        if let Some(scraper) = self.scraper.take() {
            scraper.close().await?;
        }
        Ok(())
    }
}
