mod bridge;
mod browser;
mod chapters;
mod login;
mod models;
mod viewer;


pub use bridge::BridgeResult;
pub use browser::{Driver, Key, PageElement, WaitPolicy, WebDriver};
pub use models::{Chapter, SeriesContext};

use std::path::PathBuf;

use tracing::info;

use browser::wait_for_element;
use crate::error::AppError;
use crate::storage::PageWriter;

pub(crate) const SERIES_TITLE: &str = "[class^=title_detail_introduction__name]";

/// Drives the whole download workflow over a browser session.
///
/// `epoch` counts full-page navigations; element handles captured before a
/// navigation are dead afterwards and must be re-acquired, so every
/// navigation goes through [`Scraper::navigate`], `back` or a chapter open
/// to keep the counter honest.
pub struct Scraper<D: Driver> {
    driver: D,
    wait: WaitPolicy,
    writer: PageWriter,
    output_dir: PathBuf,
    epoch: u64,
}

impl<D: Driver> Scraper<D> {
    pub fn new(driver: D, wait: WaitPolicy, writer: PageWriter, output_dir: PathBuf) -> Self {
        Self {
            driver,
            wait,
            writer,
            output_dir,
            epoch: 0,
        }
    }

    pub(crate) async fn navigate(&mut self, url: &str) -> Result<(), AppError> {
        self.driver.goto(url).await?;
        self.epoch += 1;
        Ok(())
    }

    /// Downloads every free chapter of the series at `series_url`.
    ///
    /// Chapter handles die whenever the viewer closes, so the free-chapter
    /// list is re-resolved after each chapter; a change in its length means
    /// the eligible set moved under us and the run stops.
    pub async fn download_series(&mut self, series_url: &str) -> Result<(), AppError> {
        self.navigate(series_url).await?;

        info!("Waiting for series metadata");
        let title = wait_for_element(&self.driver, &self.wait, SERIES_TITLE)
            .await?
            .text()
            .await?;
        let series = SeriesContext::new(title, &self.output_dir);

        let mut free_chapters = self.free_chapters().await?;
        let num_free_chapters = free_chapters.len();
        info!(
            series = %series.title,
            chapters = num_free_chapters,
            "Downloading chapters"
        );

        for index in 0..num_free_chapters {
            let chapter = free_chapters
                .into_iter()
                .nth(index)
                .ok_or(AppError::Consistency {
                    expected: num_free_chapters,
                    actual: index,
                })?;

            info!(chapter = %chapter.title, "Download chapter");
            self.download_chapter(&series, chapter).await?;

            // The viewer navigated away and back, so the old handles are
            // dead; re-resolve and make sure the eligible set held still.
            free_chapters = self.free_chapters().await?;
            if free_chapters.len() != num_free_chapters {
                return Err(AppError::Consistency {
                    expected: num_free_chapters,
                    actual: free_chapters.len(),
                });
            }
        }

        Ok(())
    }

    pub async fn close(self) -> Result<(), AppError> {
        self.driver.close().await
    }
}
