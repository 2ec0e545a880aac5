use std::fmt;
use std::path::{Path, PathBuf};

use super::browser::PageElement;

/// A chapter row on the series page, captured during one navigation epoch.
///
/// The handle dies on the next full-page navigation; `epoch` records the
/// generation it was captured in so a stale handle is rejected instead of
/// silently misfiring.
pub struct Chapter {
    pub title: String,
    pub(crate) handle: Box<dyn PageElement>,
    pub(crate) epoch: u64,
}

impl fmt::Debug for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chapter")
            .field("title", &self.title)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

/// Series metadata discovered once after the series page loads.
#[derive(Debug, Clone)]
pub struct SeriesContext {
    pub title: String,
    pub root: PathBuf,
}

impl SeriesContext {
    pub fn new(title: String, output_dir: &Path) -> Self {
        let root = output_dir.join(&title);
        Self { title, root }
    }
}
