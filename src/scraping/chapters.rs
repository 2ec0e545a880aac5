use super::browser::{wait_for_elements, Driver};
use super::models::Chapter;
use super::Scraper;
use crate::error::AppError;

pub(crate) const CHAPTER_ITEMS: &str = "ul>[class^=Chapter_chapter]";
pub(crate) const CHAPTER_TITLE: &str = "[class^=Chapter_chapter__name]";

/// Marker token in a chapter row's text that flags no-cost access.
pub(crate) const FREE_MARKER: &str = "無料";

impl<D: Driver> Scraper<D> {
    /// Lists the free chapters currently on the series page, in document
    /// order. Non-free chapters are skipped without being counted.
    ///
    /// The returned handles die on the next navigation, so this must be
    /// called again after every chapter download.
    pub(crate) async fn free_chapters(&self) -> Result<Vec<Chapter>, AppError> {
        let items = wait_for_elements(&self.driver, &self.wait, CHAPTER_ITEMS).await?;

        let mut chapters = Vec::new();
        for item in items {
            if !item.text().await?.contains(FREE_MARKER) {
                continue;
            }

            let title = item.find(CHAPTER_TITLE).await?.text().await?;
            chapters.push(Chapter {
                title,
                handle: item,
                epoch: self.epoch,
            });
        }

        Ok(chapters)
    }
}
