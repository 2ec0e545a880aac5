use tracing::info;

use super::bridge::{self, BridgeResult};
use super::browser::{wait_for_attr, wait_for_element, Driver, Key};
use super::models::{Chapter, SeriesContext};
use super::Scraper;
use crate::error::AppError;

pub(crate) const PAGE_FOOTER: &str = "[class^=ViewerFooter_footer__page]";
pub(crate) const BODY: &str = "body";

pub(crate) fn page_image_selector(page: u32) -> String {
    format!("img[alt=page_{page}]")
}

/// Parses the total out of the footer's "current/total" text.
pub(crate) fn parse_page_total(text: &str) -> Result<u32, AppError> {
    text.split('/')
        .nth(1)
        .and_then(|total| total.trim().parse().ok())
        .ok_or_else(|| AppError::Browser(format!("malformed page footer text: {text:?}")))
}

impl<D: Driver> Scraper<D> {
    /// Opens the reader for one chapter and saves every content page.
    ///
    /// The reported page total includes a trailing non-content page, so the
    /// loop runs for indices `0..total-1`. Leaving the viewer navigates back
    /// to the series page, which invalidates every chapter handle.
    pub(crate) async fn download_chapter(
        &mut self,
        series: &SeriesContext,
        chapter: Chapter,
    ) -> Result<(), AppError> {
        if chapter.epoch != self.epoch {
            return Err(AppError::Browser(format!(
                "stale handle for chapter {:?} (captured in epoch {}, now {})",
                chapter.title, chapter.epoch, self.epoch
            )));
        }

        info!(chapter = %chapter.title, "Opening viewer");
        chapter.handle.click().await?;
        self.epoch += 1;

        let footer = wait_for_element(&self.driver, &self.wait, PAGE_FOOTER).await?;
        let total_pages = parse_page_total(&footer.text().await?)?;
        info!(chapter = %chapter.title, total_pages, "Viewer open");

        // The last page is not part of the comic.
        for page in 0..total_pages.saturating_sub(1) {
            let selector = page_image_selector(page);
            let image = wait_for_element(&self.driver, &self.wait, &selector).await?;

            // The viewer sets src once the image resource is ready.
            let src = wait_for_attr(image.as_ref(), &self.wait, "src").await?;

            info!(page, src = %src, "Downloading page");
            let bytes = match self.driver.run_fetch_bridge(&src).await? {
                BridgeResult::Payload(payload) => bridge::decode_payload(&payload)?,
                BridgeResult::Status(status) => return Err(AppError::Fetch(status)),
            };

            self.writer
                .save(&series.root, &chapter.title, page, &bytes)
                .await?;

            // Turn the page; the next iteration's image wait absorbs the
            // rendering delay.
            self.driver.send_key(BODY, Key::ArrowLeft).await?;
        }

        self.driver.back().await?;
        self.epoch += 1;
        Ok(())
    }
}
